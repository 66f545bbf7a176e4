use crate::eijiro_txt::{
    parser::{ParserResult, SyntaxError},
    parser_helper::{Comment, Desc, Pos, Ref, Tag, TagName, Term},
    tokenizer::EijiroTxtToken as Token,
};

pub(super) fn is_word_start(tokens: &[Token]) -> bool {
    match tokens {
        [Token::String(_) | Token::Colon, ..] => true,
        [Token::LeftAngle, rest @ ..] => {
            matches!(rest, [Token::String(_) | Token::Colon, ..])
                || matches!(rest, [t, Token::String(_) | Token::Colon, ..] if is_after_angle(t))
        }
        _ => false,
    }
}

// '<' の直後には 1 文字の記号も置ける ("< 3" など)
fn is_after_angle(token: &Token) -> bool {
    matches!(
        token,
        Token::Space
            | Token::Comma
            | Token::LeftAngle
            | Token::RightAngle
            | Token::PosStart
            | Token::PosEnd
            | Token::TagNameStart
            | Token::TagNameEnd
            | Token::CommentStart
            | Token::ArticleStart
    )
}

// "{" の前の 2 つの空白も品詞の一部とみなす
pub(super) fn is_pos_start(tokens: &[Token]) -> bool {
    matches!(
        tokens,
        [Token::PosStart, ..] | [Token::Space, Token::Space, Token::PosStart, ..]
    )
}

pub(super) fn is_term_start(tokens: &[Token]) -> bool {
    matches!(tokens, [Token::RefStart, ..] | [Token::TagNameStart, ..])
        || is_pos_start(tokens)
        || is_word_start(tokens)
}

// WORD: ("<" [^→]?)? (PLAIN | ":")+ ">"?
// "<deletia>" や "<3" のための '<' '>'
pub(super) fn parse_word(tokens: &[Token]) -> ParserResult<String> {
    let mut tokens = tokens;
    let mut word = String::new();

    match tokens {
        [Token::LeftAngle, Token::String(_) | Token::Colon, ..] => {
            word.push('<');
            tokens = &tokens[1..];
        }
        [Token::LeftAngle, t, Token::String(_) | Token::Colon, ..] if is_after_angle(t) => {
            word.push('<');
            word.push_str(t.as_str());
            tokens = &tokens[2..];
        }
        _ => {}
    }

    while let Some(token @ (Token::String(_) | Token::Colon)) = tokens.first() {
        word.push_str(token.as_str());
        tokens = &tokens[1..];
    }

    if word.is_empty() {
        return Err(SyntaxError::new("word", tokens));
    }

    if let [Token::RightAngle, ..] = tokens {
        word.push('>');
        tokens = &tokens[1..];
    }

    Ok((tokens, word))
}

// KEYWORD: PLAIN+ (":" PLAIN* | " "+ PLAIN+)*
pub(super) fn parse_keyword(tokens: &[Token]) -> ParserResult<String> {
    let mut keyword = match tokens.first() {
        Some(Token::String(value)) => value.clone(),
        _ => return Err(SyntaxError::new("keyword", tokens)),
    };
    let mut tokens = &tokens[1..];

    loop {
        match tokens {
            [Token::Colon, Token::String(value), ..] => {
                keyword.push(':');
                keyword.push_str(value);
                tokens = &tokens[2..];
            }
            [Token::Colon, ..] => {
                keyword.push(':');
                tokens = &tokens[1..];
            }
            _ => {
                let spaces = tokens.iter().take_while(|&t| t == &Token::Space).count();
                match tokens.get(spaces) {
                    Some(Token::String(value)) if 0 < spaces => {
                        keyword.push_str(&" ".repeat(spaces));
                        keyword.push_str(value);
                        tokens = &tokens[(spaces + 1)..];
                    }
                    _ => break,
                }
            }
        }
    }

    Ok((tokens, keyword))
}

// DESCRIPTION: WORD ([、 ]+ WORD)*
pub(super) fn parse_desc(tokens: &[Token]) -> ParserResult<Desc> {
    let (mut tokens, mut desc) = parse_word(tokens)?;

    loop {
        let separators = tokens
            .iter()
            .take_while(|&t| matches!(t, Token::Space | Token::Comma))
            .count();

        // 区切りの後に語が続かなければ desc はここまで
        if separators == 0 || !is_word_start(&tokens[separators..]) {
            break;
        }

        for separator in &tokens[..separators] {
            desc.push_str(separator.as_str());
        }

        let (rest, word) = parse_word(&tokens[separators..])?;
        desc.push_str(&word);
        tokens = rest;
    }

    Ok((tokens, Desc(desc)))
}

// "<→" " "* KEYWORD " "* ">"
pub(super) fn parse_ref(tokens: &[Token]) -> ParserResult<Ref> {
    let mut tokens = match tokens {
        [Token::RefStart, rest @ ..] => rest,
        _ => return Err(SyntaxError::new("'<→'", tokens)),
    };

    tokens = skip_spaces(tokens);
    let (rest, keyword) = parse_keyword(tokens)?;
    tokens = skip_spaces(rest);

    match tokens {
        [Token::RightAngle, rest @ ..] => Ok((rest, Ref(keyword))),
        _ => Err(SyntaxError::new("'>'", tokens)),
    }
}

// ("{" | "  {" | "  {{" | "  {{{") WORD "}"+
// "amygdalo-" などは "{" が重なっている
pub(super) fn parse_pos(tokens: &[Token]) -> ParserResult<Pos> {
    let tokens = match tokens {
        [Token::Space, Token::Space, Token::PosStart, ..] => &tokens[2..],
        _ => tokens,
    };

    let braces = tokens.iter().take_while(|&t| t == &Token::PosStart).count();
    if !(1..=3).contains(&braces) {
        return Err(SyntaxError::new("'{'", &tokens[braces.min(3)..]));
    }

    let (tokens, word) = parse_word(&tokens[braces..])?;

    let braces = tokens.iter().take_while(|&t| t == &Token::PosEnd).count();
    if braces == 0 {
        return Err(SyntaxError::new("'}'", tokens));
    }

    Ok((&tokens[braces..], Pos(word)))
}

// "【"+ WORD "】"+
// "cerium" などは "【" "】" が重なっている
pub(super) fn parse_tag_name(tokens: &[Token]) -> ParserResult<TagName> {
    let brackets = tokens.iter().take_while(|&t| t == &Token::TagNameStart).count();
    if brackets == 0 {
        return Err(SyntaxError::new("'【'", tokens));
    }

    let (tokens, word) = parse_word(&tokens[brackets..])?;

    let brackets = tokens.iter().take_while(|&t| t == &Token::TagNameEnd).count();
    if brackets == 0 {
        return Err(SyntaxError::new("'】'", tokens));
    }

    Ok((&tokens[brackets..], TagName(word)))
}

// tagname " "? [desc pos? comment?]
pub(super) fn parse_tag(tokens: &[Token]) -> ParserResult<Tag> {
    let (mut tokens, name) = parse_tag_name(tokens)?;
    tokens = skip_optional_space(tokens);

    let mut tag = Tag {
        name,
        desc: None,
        pos: None,
        comment: None,
    };

    if !is_word_start(tokens) {
        return Ok((tokens, tag));
    }

    let (rest, desc) = parse_desc(tokens)?;
    tokens = rest;
    tag.desc = Some(desc);

    if is_pos_start(tokens) {
        let (rest, pos) = parse_pos(tokens)?;
        tokens = rest;
        tag.pos = Some(pos);
    }

    if let [Token::CommentStart, ..] = tokens {
        let (rest, comment) = parse_comment(tokens)?;
        tokens = rest;
        tag.comment = Some(comment);
    }

    Ok((tokens, tag))
}

// "◆" " "? term ("、"? term)*
pub(super) fn parse_comment(tokens: &[Token]) -> ParserResult<Comment> {
    let tokens = match tokens {
        [Token::CommentStart, rest @ ..] => skip_optional_space(rest),
        _ => return Err(SyntaxError::new("'◆'", tokens)),
    };

    let (tokens, term) = parse_term(tokens)?;

    let mut terms = vec![term];
    let tokens = parse_following_terms(tokens, &mut terms)?;

    Ok((tokens, Comment(terms)))
}

// desc | ref | tag | pos
pub(super) fn parse_term(tokens: &[Token]) -> ParserResult<Term> {
    match tokens {
        [Token::RefStart, ..] => parse_ref(tokens).map(|(rest, r)| (rest, Term::Ref(r))),
        [Token::TagNameStart, ..] => parse_tag(tokens).map(|(rest, tag)| (rest, Term::Tag(tag))),
        _ if is_pos_start(tokens) => parse_pos(tokens).map(|(rest, pos)| (rest, Term::Pos(pos))),
        _ if is_word_start(tokens) => {
            parse_desc(tokens).map(|(rest, desc)| (rest, Term::Desc(desc)))
        }
        _ => Err(SyntaxError::new("term", tokens)),
    }
}

// ("、"? term)*
pub(super) fn parse_following_terms<'a>(
    tokens: &'a [Token],
    terms: &mut Vec<Term>,
) -> Result<&'a [Token], SyntaxError> {
    let mut tokens = tokens;

    loop {
        let next = match tokens {
            [Token::Comma, rest @ ..] => rest,
            _ => tokens,
        };

        if !is_term_start(next) {
            return Ok(tokens);
        }

        let (rest, term) = parse_term(next)?;
        terms.push(term);
        tokens = rest;
    }
}

fn skip_spaces(tokens: &[Token]) -> &[Token] {
    let spaces = tokens.iter().take_while(|&t| t == &Token::Space).count();
    &tokens[spaces..]
}

// 空白 1 つを読み飛ばす
// ただし "  {" は品詞の開始なので残す
fn skip_optional_space(tokens: &[Token]) -> &[Token] {
    match tokens {
        [Token::Space, Token::Space, Token::PosStart, ..] => tokens,
        [Token::Space, rest @ ..] => rest,
        _ => tokens,
    }
}
