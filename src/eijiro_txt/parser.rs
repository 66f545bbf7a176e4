use thiserror::Error;

use crate::eijiro_txt::{
    body_parser::parse_body,
    parser_helper::{Article, Content, Example, Head, Key},
    term_parser::{is_pos_start, parse_comment, parse_desc, parse_keyword, parse_pos},
    tokenizer::{tokenize_eijiro_txt, EijiroTxtToken as Token},
};

/// 1 行が文法に合わなかったときのエラー．元の行をそのまま持つ．
#[derive(Debug, Error)]
#[error("Cannot parse: {} (expected {expected}, found {found})", .line.trim_end())]
pub struct ParseError {
    pub line: String,
    pub expected: &'static str,
    pub found: String,
}

// 各パーサーの途中のエラー．行の情報は parse_article で付ける．
#[derive(Debug)]
pub(super) struct SyntaxError {
    expected: &'static str,
    found: Option<Token>,
}

impl SyntaxError {
    pub(super) fn new(expected: &'static str, tokens: &[Token]) -> Self {
        Self {
            expected,
            found: tokens.first().cloned(),
        }
    }
}

// (残りのトークン, 解析結果)
pub(super) type ParserResult<'a, T> = Result<(&'a [Token], T), SyntaxError>;

// 構文解析
pub fn parse_article(line: &str) -> Result<Article, ParseError> {
    let tokens = split_leading_example_start(tokenize_eijiro_txt(line));

    parse_article_tokens(&tokens).map_err(|e| ParseError {
        line: line.to_owned(),
        expected: e.expected,
        found: match e.found {
            Some(token) => format!("{:?}", token.as_str()),
            None => "end of input".to_owned(),
        },
    })
}

// 行頭の "■・" は例文ではなく "・" で始まる見出し語
fn split_leading_example_start(tokens: Vec<Token>) -> Vec<Token> {
    let mut tokens = tokens.into_iter();

    match tokens.next() {
        Some(Token::ExampleStart) => {
            let mut result = vec![Token::ArticleStart];
            let mut rest = tokens.peekable();
            match rest.next_if(|t| matches!(t, Token::String(_))) {
                Some(Token::String(value)) => result.push(Token::String(format!("・{}", value))),
                _ => result.push(Token::String("・".to_owned())),
            }
            result.extend(rest);
            result
        }
        first => first.into_iter().chain(tokens).collect(),
    }
}

// "■" key content* example* " "* "\n"
fn parse_article_tokens(tokens: &[Token]) -> Result<Article, SyntaxError> {
    let tokens = match tokens {
        [Token::ArticleStart, rest @ ..] => rest,
        _ => return Err(SyntaxError::new("'■'", tokens)),
    };

    let (mut tokens, key) = parse_keyword(tokens)?;
    let key = Key(key);

    let mut contents = Vec::new();
    while is_content_start(tokens) {
        let (rest, content) = parse_content(tokens)?;
        tokens = rest;
        contents.push(content);
    }

    let mut examples = Vec::new();
    while let [Token::ExampleStart, ..] = tokens {
        let (rest, example) = parse_example(tokens)?;
        tokens = rest;
        examples.push(example);
    }

    let spaces = tokens.iter().take_while(|&t| t == &Token::Space).count();
    match &tokens[spaces..] {
        [Token::NewLine] => Ok(Article {
            key,
            contents,
            examples,
        }),
        [Token::NewLine, rest @ ..] => Err(SyntaxError::new("end of line", rest)),
        rest => Err(SyntaxError::new("'\\n'", rest)),
    }
}

fn is_content_start(tokens: &[Token]) -> bool {
    matches!(tokens, [Token::Space, Token::Colon, Token::Space, ..]) || is_pos_start(tokens)
}

// head? " : " body
fn parse_content(tokens: &[Token]) -> ParserResult<Content> {
    let mut tokens = tokens;

    let head = if is_pos_start(tokens) {
        let (rest, pos) = parse_pos(tokens)?;
        tokens = rest;
        Some(Head(pos))
    } else {
        None
    };

    let tokens = match tokens {
        [Token::Space, Token::Colon, Token::Space, rest @ ..] => rest,
        _ => return Err(SyntaxError::new("' : '", tokens)),
    };

    let (tokens, body) = parse_body(tokens)?;

    Ok((tokens, Content { head, body }))
}

// "■・" desc comment*
fn parse_example(tokens: &[Token]) -> ParserResult<Example> {
    let tokens = match tokens {
        [Token::ExampleStart, rest @ ..] => rest,
        _ => return Err(SyntaxError::new("'■・'", tokens)),
    };

    let (mut tokens, desc) = parse_desc(tokens)?;

    let mut comments = Vec::new();
    while let [Token::CommentStart, ..] = tokens {
        let (rest, comment) = parse_comment(tokens)?;
        tokens = rest;
        comments.push(comment);
    }

    Ok((tokens, Example { desc, comments }))
}
