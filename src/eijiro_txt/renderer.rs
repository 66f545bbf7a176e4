use std::collections::HashMap;

use indicatif::ProgressBar;
use once_cell::sync::Lazy;

use crate::eijiro_txt::parser_helper::{
    Article, Body, Comment, Content, Desc, Example, Head, Key, Pos, Ref, Tag, TagName, Tags, Term,
    Translation,
};

// 構文木の節の種類 (文法の規則名)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Article,
    Key,
    Content,
    Head,
    Body,
    Pos,
    Tags,
    Tag,
    TagName,
    Translation,
    Comment,
    Example,
    Term,
    Desc,
    Ref,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TagSpec {
    // [name]...[/name]
    Named(&'static str),
    // left...right
    Literal(&'static str, &'static str),
}

const M1: TagSpec = TagSpec::Literal(" [m1]", "[/m]\n");
const M2: TagSpec = TagSpec::Literal("  [m2]", "[/m]\n");

// 節ごとに付けるタグ (先頭が外側)
// ここにない節は子をそのまま連結する
pub static TAG_CONF: Lazy<HashMap<Label, Vec<TagSpec>>> = Lazy::new(|| {
    HashMap::from([
        (Label::Content, vec![M1]),
        (Label::Head, vec![TagSpec::Literal("", ") ")]),
        (Label::Pos, vec![TagSpec::Named("b"), TagSpec::Named("c")]),
        (Label::Body, vec![TagSpec::Named("trn")]),
        (
            Label::TagName,
            vec![
                TagSpec::Named("b"),
                TagSpec::Literal(" [c brown]", "[/c] "),
            ],
        ),
        (Label::Example, vec![M2, TagSpec::Named("ex")]),
        (
            Label::Comment,
            vec![TagSpec::Named("com"), TagSpec::Literal(" [c gray]◆", "[/c]")],
        ),
        (Label::Ref, vec![TagSpec::Literal(" <<", ">>")]),
    ])
});

pub fn entag(content: &str, tags: &[TagSpec]) -> String {
    match tags.split_first() {
        None => content.to_owned(),
        Some((TagSpec::Named(name), rest)) => {
            format!("[{}]{}[/{}]", name, entag(content, rest), name)
        }
        Some((TagSpec::Literal(left, right), rest)) => {
            format!("{}{}{}", left, entag(content, rest), right)
        }
    }
}

fn decorate(label: Label, content: String) -> String {
    match TAG_CONF.get(&label) {
        Some(tags) => entag(&content, tags),
        None => content,
    }
}

pub const PROGRESS_INTERVAL: usize = 10000;

// 1 回の変換の間の状態を持つ
// 同じ見出し語が続く場合は最初の 1 つだけ見出しを出力する
pub struct Renderer {
    last_word: String,
    count: usize,
    progress_bar: Option<ProgressBar>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last_word: String::new(),
            count: 0,
            progress_bar: None,
        }
    }

    pub fn with_progress_bar(progress_bar: ProgressBar) -> Self {
        Self {
            progress_bar: Some(progress_bar),
            ..Self::new()
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn last_word(&self) -> &str {
        &self.last_word
    }

    pub fn render_article(&mut self, article: &Article) -> String {
        let mut rendered = self.render_key(&article.key);
        for content in &article.contents {
            rendered.push_str(&render_content(content));
        }
        for example in &article.examples {
            rendered.push_str(&render_example(example));
        }

        self.count += 1;
        if let Some(message) = self.progress_message() {
            match &self.progress_bar {
                Some(pb) => pb.println(message),
                None => println!("{}", message),
            }
        }
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
        }

        rendered
    }

    // PROGRESS_INTERVAL 件ごとの経過報告
    fn progress_message(&self) -> Option<String> {
        (0 < self.count && self.count % PROGRESS_INTERVAL == 0)
            .then(|| format!("Processed {} words (now: {}).", self.count, self.last_word))
    }

    fn render_key(&mut self, key: &Key) -> String {
        if key.0 == self.last_word {
            return String::new();
        }

        self.last_word = key.0.clone();
        format!("{}\n", key.0)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_content(content: &Content) -> String {
    let mut rendered = String::new();
    if let Some(head) = &content.head {
        rendered.push_str(&render_head(head));
    }
    rendered.push_str(&render_body(&content.body));

    decorate(Label::Content, rendered)
}

fn render_head(head: &Head) -> String {
    decorate(Label::Head, render_pos(&head.0))
}

fn render_pos(pos: &Pos) -> String {
    decorate(Label::Pos, pos.0.clone())
}

fn render_body(body: &Body) -> String {
    let rendered = match body {
        Body::Tags { tags } => render_tags(tags),
        Body::Translation {
            translation,
            comments,
        } => {
            let mut rendered = String::new();
            if let Some(translation) = translation {
                rendered.push_str(&render_translation(translation));
            }
            for comment in comments {
                rendered.push_str(&render_comment(comment));
            }
            rendered
        }
    };

    decorate(Label::Body, rendered)
}

fn render_tags(tags: &Tags) -> String {
    let rendered = tags.0.iter().map(render_tag).collect::<String>();
    decorate(Label::Tags, rendered)
}

fn render_tag(tag: &Tag) -> String {
    let mut rendered = render_tag_name(&tag.name);
    if let Some(desc) = &tag.desc {
        rendered.push_str(&render_desc(desc));
    }
    if let Some(pos) = &tag.pos {
        rendered.push_str(&render_pos(pos));
    }
    if let Some(comment) = &tag.comment {
        rendered.push_str(&render_comment(comment));
    }

    decorate(Label::Tag, rendered)
}

fn render_tag_name(tag_name: &TagName) -> String {
    decorate(Label::TagName, tag_name.0.clone())
}

fn render_translation(translation: &Translation) -> String {
    let rendered = translation.0.iter().map(render_term).collect::<String>();
    decorate(Label::Translation, rendered)
}

fn render_comment(comment: &Comment) -> String {
    let rendered = comment.0.iter().map(render_term).collect::<String>();
    decorate(Label::Comment, rendered)
}

fn render_example(example: &Example) -> String {
    let mut rendered = render_desc(&example.desc);
    for comment in &example.comments {
        rendered.push_str(&render_comment(comment));
    }

    decorate(Label::Example, rendered)
}

fn render_term(term: &Term) -> String {
    let rendered = match term {
        Term::Desc(desc) => render_desc(desc),
        Term::Ref(r) => render_ref(r),
        Term::Tag(tag) => render_tag(tag),
        Term::Pos(pos) => render_pos(pos),
    };

    decorate(Label::Term, rendered)
}

fn render_desc(desc: &Desc) -> String {
    decorate(Label::Desc, desc.0.clone())
}

fn render_ref(r: &Ref) -> String {
    decorate(Label::Ref, r.0.clone())
}

#[cfg(test)]
mod tests {
    use super::{entag, Label, Renderer, TagSpec, PROGRESS_INTERVAL, TAG_CONF};
    use crate::eijiro_txt::parser::parse_article;

    #[test]
    fn test_entag_outermost_first() {
        let tags = [
            TagSpec::Named("b"),
            TagSpec::Literal(" [c brown]", "[/c] "),
        ];
        assert_eq!(entag("名", &tags), "[b] [c brown]名[/c] [/b]");
        assert_eq!(entag("名", &[]), "名");
    }

    #[test]
    fn test_pass_through_labels() {
        for label in [
            Label::Article,
            Label::Key,
            Label::Tags,
            Label::Tag,
            Label::Translation,
            Label::Term,
            Label::Desc,
        ] {
            assert!(TAG_CONF.get(&label).is_none(), "{:?}", label);
        }
    }

    #[test]
    fn test_progress_message() -> anyhow::Result<()> {
        let mut renderer = Renderer::new();
        assert_eq!(renderer.progress_message(), None);

        renderer.count = PROGRESS_INTERVAL - 2;
        renderer.render_article(&parse_article("■dog : 犬\n")?);
        assert_eq!(renderer.count(), 9_999);
        assert_eq!(renderer.progress_message(), None);

        renderer.render_article(&parse_article("■cat : 猫\n")?);
        assert_eq!(renderer.count(), 10_000);
        assert_eq!(
            renderer.progress_message().as_deref(),
            Some("Processed 10000 words (now: cat).")
        );

        // 同じ見出し語が続いても件数は数える
        renderer.render_article(&parse_article("■cat : ネコ\n")?);
        assert_eq!(renderer.count(), 10_001);
        assert_eq!(renderer.progress_message(), None);

        renderer.count = 2 * PROGRESS_INTERVAL - 1;
        renderer.render_article(&parse_article("■cat : 猫科\n")?);
        assert_eq!(
            renderer.progress_message().as_deref(),
            Some("Processed 20000 words (now: cat).")
        );

        Ok(())
    }
}
