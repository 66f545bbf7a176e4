use encoding_rs::Encoding;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Unknown encoding: {0}")]
    UnknownLabel(String),

    #[error("Input is not valid {0}")]
    Malformed(&'static str),
}

// Python のエンコーディング名も受け付ける
// それ以外は WHATWG のラベル (shift_jis, euc-jp など)
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, EncodingError> {
    match label.trim().to_ascii_lowercase().as_str() {
        "cp932" | "ms932" | "mskanji" | "ms-kanji" => Ok(encoding_rs::SHIFT_JIS),
        "utf-8" | "utf8" | "utf-8-sig" | "utf_8" | "u8" => Ok(encoding_rs::UTF_8),
        other => Encoding::for_label(other.as_bytes())
            .ok_or_else(|| EncodingError::UnknownLabel(label.to_owned())),
    }
}

// BOM は取り除く
// 変換できないバイト列があればエラー (置換文字にはしない)
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> Result<String, EncodingError> {
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(EncodingError::Malformed(encoding.name()));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_for_label() {
        assert_eq!(encoding_for_label("cp932").unwrap(), encoding_rs::SHIFT_JIS);
        assert_eq!(encoding_for_label("UTF-8").unwrap(), encoding_rs::UTF_8);
        assert_eq!(encoding_for_label("euc-jp").unwrap(), encoding_rs::EUC_JP);
        assert!(encoding_for_label("no-such-encoding").is_err());
    }

    #[test]
    fn test_decode() {
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode("■犬 : dog\n");
        assert_eq!(
            decode(&bytes, encoding_rs::SHIFT_JIS).unwrap(),
            "■犬 : dog\n"
        );

        assert_eq!(
            decode(b"\xEF\xBB\xBFabc", encoding_rs::UTF_8).unwrap(),
            "abc"
        );
        assert!(decode(b"\xFF\xFE\xFD", encoding_rs::UTF_8).is_err());
    }
}
