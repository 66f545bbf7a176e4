use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type", content = "content")]
pub enum EijiroTxtToken {
    String(String), // 区切り文字以外の連続
    NewLine,
    Space,

    ArticleStart, // ■
    ExampleStart, // ■・

    Colon, // :

    RefStart,   // <→
    LeftAngle,  // <
    RightAngle, // >

    PosStart, // {
    PosEnd,   // }

    TagNameStart, // 【
    TagNameEnd,   // 】

    CommentStart, // ◆
    Comma,        // 、
}

impl EijiroTxtToken {
    // 元の文字列
    pub fn as_str(&self) -> &str {
        match self {
            Self::String(value) => value,
            Self::NewLine => "\n",
            Self::Space => " ",
            Self::ArticleStart => "■",
            Self::ExampleStart => "■・",
            Self::Colon => ":",
            Self::RefStart => "<→",
            Self::LeftAngle => "<",
            Self::RightAngle => ">",
            Self::PosStart => "{",
            Self::PosEnd => "}",
            Self::TagNameStart => "【",
            Self::TagNameEnd => "】",
            Self::CommentStart => "◆",
            Self::Comma => "、",
        }
    }
}

// 字句解析
pub fn tokenize_eijiro_txt(line: &str) -> Vec<EijiroTxtToken> {
    let mut tokens = Vec::new();

    let mut chars: &[char] = &line.chars().collect::<Vec<_>>();

    let mut string_buffer = String::new();

    while !chars.is_empty() {
        let special_token = match chars[0] {
            '■' => match chars.get(1) {
                Some(&'・') => Some((2, EijiroTxtToken::ExampleStart)),
                _ => Some((1, EijiroTxtToken::ArticleStart)),
            },

            '<' => match chars.get(1) {
                Some(&'→') => Some((2, EijiroTxtToken::RefStart)),
                _ => Some((1, EijiroTxtToken::LeftAngle)),
            },
            '>' => Some((1, EijiroTxtToken::RightAngle)),

            // CR+LF は改行，CR 単独はただの文字 (行は LF でのみ区切る)
            '\r' => match chars.get(1) {
                Some(&'\n') => Some((2, EijiroTxtToken::NewLine)),
                _ => None,
            },
            '\n' => Some((1, EijiroTxtToken::NewLine)),
            ' ' => Some((1, EijiroTxtToken::Space)),

            ':' => Some((1, EijiroTxtToken::Colon)),
            '{' => Some((1, EijiroTxtToken::PosStart)),
            '}' => Some((1, EijiroTxtToken::PosEnd)),
            '【' => Some((1, EijiroTxtToken::TagNameStart)),
            '】' => Some((1, EijiroTxtToken::TagNameEnd)),
            '◆' => Some((1, EijiroTxtToken::CommentStart)),
            '、' => Some((1, EijiroTxtToken::Comma)),

            _ => None,
        };

        match special_token {
            Some((len, token)) => {
                if !string_buffer.is_empty() {
                    tokens.push(EijiroTxtToken::String(string_buffer));
                    string_buffer = String::new();
                }

                tokens.push(token);
                chars = &chars[len..];
            }

            None => {
                string_buffer.push(chars[0]);
                chars = &chars[1..];
            }
        }
    }

    if !string_buffer.is_empty() {
        tokens.push(EijiroTxtToken::String(string_buffer));
    }

    tokens
}
