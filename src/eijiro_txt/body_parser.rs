use crate::eijiro_txt::{
    parser::ParserResult,
    parser_helper::{Body, Tags, Term, Translation},
    term_parser::{
        is_word_start, parse_comment, parse_desc, parse_following_terms, parse_ref, parse_tag,
    },
    tokenizer::EijiroTxtToken as Token,
};

// tags | translation? comment*
pub(super) fn parse_body(tokens: &[Token]) -> ParserResult<Body> {
    if let [Token::TagNameStart, ..] = tokens {
        let (tokens, tags) = parse_tags(tokens)?;
        return Ok((tokens, Body::Tags { tags }));
    }

    let mut tokens = tokens;

    let translation = if matches!(tokens, [Token::RefStart, ..]) || is_word_start(tokens) {
        let (rest, translation) = parse_translation(tokens)?;
        tokens = rest;
        Some(translation)
    } else {
        None
    };

    let mut comments = Vec::new();
    while let [Token::CommentStart, ..] = tokens {
        let (rest, comment) = parse_comment(tokens)?;
        tokens = rest;
        comments.push(comment);
    }

    Ok((
        tokens,
        Body::Translation {
            translation,
            comments,
        },
    ))
}

// tag (" "* "、"? tag)*
fn parse_tags(tokens: &[Token]) -> ParserResult<Tags> {
    let (mut tokens, tag) = parse_tag(tokens)?;
    let mut tags = vec![tag];

    loop {
        let spaces = tokens.iter().take_while(|&t| t == &Token::Space).count();
        let next = match &tokens[spaces..] {
            [Token::Comma, rest @ ..] => rest,
            rest => rest,
        };

        if !matches!(next, [Token::TagNameStart, ..]) {
            break;
        }

        let (rest, tag) = parse_tag(next)?;
        tokens = rest;
        tags.push(tag);
    }

    Ok((tokens, Tags(tags)))
}

// (desc | ref) ("、"? term)* "、"? " "?
fn parse_translation(tokens: &[Token]) -> ParserResult<Translation> {
    let (tokens, first) = match tokens {
        [Token::RefStart, ..] => parse_ref(tokens).map(|(rest, r)| (rest, Term::Ref(r)))?,
        _ => parse_desc(tokens).map(|(rest, desc)| (rest, Term::Desc(desc)))?,
    };

    let mut terms = vec![first];
    let mut tokens = parse_following_terms(tokens, &mut terms)?;

    if let [Token::Comma, rest @ ..] = tokens {
        tokens = rest;
    }

    // " : " は次の content の区切りなので残す
    match tokens {
        [Token::Space, Token::Colon, Token::Space, ..] => {}
        [Token::Space, rest @ ..] => tokens = rest,
        _ => {}
    }

    Ok((tokens, Translation(terms)))
}
