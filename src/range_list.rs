// 数値の範囲を表す文字列 (印刷時のページ範囲指定などの記法) の解析
//
// - カンマ区切りで数値もしくは数値範囲を指定する
// - 数値範囲は下限値と上限値をハイフンで繋ぐ (3-7 など)
// - 下限値・上限値は省略でき，省略時はそれぞれ begin・end を使う
//   (begin=3 のとき "-5" は "3-5"，end=10 のとき "5-" は "5-10")
// - 下限値が上限値より大きい範囲 ("5-2" など) は空とする
//
// 1 <= begin <= end であることは呼び出し側で保証する

use std::{collections::BTreeSet, ops::RangeInclusive};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Cannot recognize: '{token}'")]
pub struct RangeSyntaxError {
    pub token: String,
}

// 範囲の指定を RangeInclusive の列に変換する
pub fn to_ranges(
    s: &str,
    begin: usize,
    end: usize,
) -> Result<Vec<RangeInclusive<usize>>, RangeSyntaxError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }

    s.split(',')
        .map(|token| parse_range(token, begin, end))
        .collect()
}

// 範囲の指定を重複のない昇順の数値列に変換する
pub fn to_numbers(s: &str, begin: usize, end: usize) -> Result<Vec<usize>, RangeSyntaxError> {
    let numbers: BTreeSet<usize> = to_ranges(s, begin, end)?.into_iter().flatten().collect();
    Ok(numbers.into_iter().collect())
}

fn parse_range(
    token: &str,
    begin: usize,
    end: usize,
) -> Result<RangeInclusive<usize>, RangeSyntaxError> {
    static REGEX_RANGED: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\s*(\d*)\s*-\s*(\d*)\s*$").unwrap());
    static REGEX_SINGLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\s*$").unwrap());

    let error = || RangeSyntaxError {
        token: token.to_owned(),
    };

    let parse_number = |s: &str, default: usize| -> Result<usize, RangeSyntaxError> {
        if s.is_empty() {
            Ok(default)
        } else {
            s.parse().map_err(|_| error())
        }
    };

    if let Some(captures) = REGEX_RANGED.captures(token) {
        let (lower, upper) = (&captures[1], &captures[2]);

        // "-" だけのものは受け付けない
        if lower.is_empty() && upper.is_empty() {
            return Err(error());
        }

        Ok(parse_number(lower, begin)?..=parse_number(upper, end)?)
    } else if let Some(captures) = REGEX_SINGLE.captures(token) {
        let n = parse_number(&captures[1], begin)?;
        Ok(n..=n)
    } else {
        Err(error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_ranges() {
        assert_eq!(
            to_ranges(" -2, 4-6 ,9- ", 1, 10),
            Ok(vec![1..=2, 4..=6, 9..=10])
        );
        assert_eq!(to_ranges("3", 1, 10), Ok(vec![3..=3]));
    }

    #[test]
    fn test_whitespace_around_hyphen() {
        assert_eq!(to_ranges("1 - 3", 1, 10), Ok(vec![1..=3]));
    }
}
