use serde::{Deserialize, Serialize};

// 1 行 = 1 項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub key: Key,
    pub contents: Vec<Content>,
    pub examples: Vec<Example>,
}

// 見出し語
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key(pub String);

// {品詞} : 本文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub head: Option<Head>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Head(pub Pos);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum Body {
    Tags {
        tags: Tags,
    },
    Translation {
        translation: Option<Translation>,
        comments: Vec<Comment>,
    },
}

// {名} など
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pos(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tags(pub Vec<Tag>);

// 【変化】... など
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: TagName,
    pub desc: Option<Desc>,
    // desc がある場合のみ
    pub pos: Option<Pos>,
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagName(pub String);

// 先頭は Desc か Ref
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation(pub Vec<Term>);

// ◆...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment(pub Vec<Term>);

// ■・...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub desc: Desc,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type", content = "content")]
pub enum Term {
    Desc(Desc),
    Ref(Ref),
    Tag(Tag),
    Pos(Pos),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Desc(pub String);

// <→...>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ref(pub String);
