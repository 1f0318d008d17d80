//! Tokenizer
use super::{demux::demux_spanned, SpannedToken, Token};

/// Split path data into operators and numbers.
///
/// Every ASCII letter is an operator. Commas and whitespace separate numbers,
/// and a minus sign starts a new number. Chunks are then split further by
/// [`demux`](super::demux). A chunk that does not form a number becomes
/// [`Token::Malformed`]; the interpreter reports it if it's ever reached.
///
/// ```
/// use rrpath_compile::path::{tokenize, Token};
/// assert_eq!(
///     tokenize("M1,2-3"),
///     [Token::Operator('M'), Token::Number(1.0), Token::Number(2.0), Token::Number(-3.0)],
/// );
/// ```
pub fn tokenize(data: &str) -> Vec<Token> {
    tokenize_spanned(data)
        .into_iter()
        .map(|spanned| spanned.token)
        .collect()
}

/// [`tokenize`] retaining the byte range of each token in `data`.
pub fn tokenize_spanned(data: &str) -> Vec<SpannedToken> {
    let mut tokens = Vec::new();

    // The start of the chunk being scanned
    let mut chunk_start: Option<usize> = None;

    let flush = |tokens: &mut Vec<SpannedToken>, start: &mut Option<usize>, end: usize| {
        if let Some(start) = start.take() {
            for (literal, span) in demux_spanned(&data[start..end], start) {
                let token = match literal.parse() {
                    Ok(x) => Token::Number(x),
                    Err(_) => Token::Malformed(literal),
                };
                tokens.push(SpannedToken { token, span });
            }
        }
    };

    for (i, c) in data.char_indices() {
        if c.is_ascii_alphabetic() {
            flush(&mut tokens, &mut chunk_start, i);
            tokens.push(SpannedToken {
                token: Token::Operator(c),
                span: i..i + 1,
            });
        } else if c == ',' || c.is_whitespace() {
            flush(&mut tokens, &mut chunk_start, i);
        } else if c == '-' {
            flush(&mut tokens, &mut chunk_start, i);
            chunk_start = Some(i);
        } else if chunk_start.is_none() {
            chunk_start = Some(i);
        }
    }
    flush(&mut tokens, &mut chunk_start, data.len());

    log::trace!("tokenize({:?}) = {} token(s)", data, tokens.len());

    tokens
}
