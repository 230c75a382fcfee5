//! Keyword-substitution translation of extracted text into Japanese.
//!
//! No translation API is involved: a static table of (phrase, replacement)
//! pairs is applied to titles and descriptions. Rules run strictly from the
//! longest source phrase to the shortest, and once a span of text has been
//! substituted it is frozen: later (shorter) rules never re-scan it. That
//! ordering is what keeps `news` from being corrupted by the `new` rule when
//! both appear in the same string.
//!
//! Unmatched text passes through unchanged; translation never fails.

use once_cell::sync::Lazy;

/// One substitution rule.
///
/// `case_insensitive` controls how `from` is matched. Replacement text is
/// always emitted exactly as written, regardless of the matched casing.
#[derive(Debug, Clone)]
pub struct Rule {
    pub from: &'static str,
    pub to: &'static str,
    pub case_insensitive: bool,
}

impl Rule {
    const fn exact(from: &'static str, to: &'static str) -> Self {
        Rule { from, to, case_insensitive: false }
    }

    const fn any_case(from: &'static str, to: &'static str) -> Self {
        Rule { from, to, case_insensitive: true }
    }
}

/// An ordered set of substitution rules.
///
/// Construction sorts the rules by descending phrase length with a stable
/// sort, so rules of equal length keep their listed order (first-listed wins).
#[derive(Debug)]
pub struct Translator {
    rules: Vec<Rule>,
}

/// A span of text during translation. `Done` spans came out of a rule and
/// are never matched again.
#[derive(Debug)]
enum Segment {
    Raw(String),
    Done(String),
}

impl Translator {
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by(|a, b| b.from.chars().count().cmp(&a.from.chars().count()));
        Translator { rules }
    }

    /// Apply every rule to `text`, longest phrase first.
    ///
    /// Replaces all non-overlapping occurrences of each phrase before moving
    /// on to the next rule. Already-substituted spans are skipped by later
    /// rules, so re-applying the translator to its own output is a no-op
    /// unless the output still contains untranslated source phrases.
    pub fn translate(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut segments = vec![Segment::Raw(text.to_string())];
        for rule in &self.rules {
            if rule.from.is_empty() {
                continue;
            }
            segments = segments
                .into_iter()
                .flat_map(|seg| match seg {
                    Segment::Raw(raw) => apply_rule(&raw, rule),
                    done @ Segment::Done(_) => vec![done],
                })
                .collect();
        }

        let mut out = String::with_capacity(text.len());
        for seg in segments {
            match seg {
                Segment::Raw(s) | Segment::Done(s) => out.push_str(&s),
            }
        }
        out
    }
}

/// Split one raw span on every occurrence of `rule.from`, freezing the
/// replacement text so later rules cannot touch it.
fn apply_rule(raw: &str, rule: &Rule) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut rest = raw;

    while let Some(at) = find_phrase(rest, rule) {
        let before = &rest[..at];
        if !before.is_empty() {
            out.push(Segment::Raw(before.to_string()));
        }
        out.push(Segment::Done(rule.to.to_string()));
        rest = &rest[at + rule.from.len()..];
    }

    if out.is_empty() {
        // no match; hand the span back untouched
        return vec![Segment::Raw(raw.to_string())];
    }
    if !rest.is_empty() {
        out.push(Segment::Raw(rest.to_string()));
    }
    out
}

/// Byte offset of the next occurrence of the rule's phrase, honoring the
/// rule's case sensitivity. Case-insensitive matching compares ASCII
/// lowercase forms, which is sufficient for the English source phrases; the
/// returned offset is valid in the original string because ASCII folding
/// preserves byte lengths.
fn find_phrase(haystack: &str, rule: &Rule) -> Option<usize> {
    if rule.case_insensitive {
        haystack
            .to_ascii_lowercase()
            .find(&rule.from.to_ascii_lowercase())
    } else {
        haystack.find(rule.from)
    }
}

/// The vendor-term dictionary, merged from both source pages' vocabularies.
///
/// Vocabulary rules match case-insensitively since headlines are title-case
/// ("New Research on Model Safety" must translate the same as its lowercase
/// form). Identity rules for brand and product names (`ChatGPT`, `Claude`,
/// and friends) are not decorative: being longer than the generic phrases
/// they overlap, they claim those spans first and shield the names from
/// partial rewrites. `AI` and `GPT-4` stay case-sensitive, or they would
/// fire inside ordinary words like "available" and "maintain".
pub static RULES: Lazy<Translator> = Lazy::new(|| {
    Translator::new(vec![
        Rule::any_case("artificial intelligence", "人工知能"),
        Rule::any_case("machine learning", "機械学習"),
        Rule::any_case("deep learning", "ディープラーニング"),
        Rule::any_case("neural network", "ニューラルネットワーク"),
        Rule::any_case("release notes", "リリースノート"),
        Rule::any_case("announcement", "発表"),
        Rule::any_case("breakthrough", "ブレークスルー"),
        Rule::any_case("advancement", "進歩"),
        Rule::any_case("development", "開発"),
        Rule::any_case("improvement", "改善"),
        Rule::any_case("enhancement", "強化"),
        Rule::any_case("performance", "パフォーマンス"),
        Rule::any_case("partnership", "パートナーシップ"),
        Rule::any_case("collaboration", "コラボレーション"),
        Rule::any_case("capability", "機能"),
        Rule::any_case("experience", "体験"),
        Rule::any_case("innovation", "イノベーション"),
        Rule::any_case("interface", "インターフェース"),
        Rule::any_case("technology", "技術"),
        Rule::any_case("responsible", "責任ある"),
        Rule::any_case("introduces", "導入"),
        Rule::any_case("launched", "ローンチ"),
        Rule::any_case("available", "利用可能"),
        Rule::any_case("algorithm", "アルゴリズム"),
        Rule::any_case("research", "研究"),
        Rule::any_case("training", "トレーニング"),
        Rule::any_case("security", "セキュリティ"),
        Rule::any_case("privacy", "プライバシー"),
        Rule::any_case("release", "リリース"),
        Rule::any_case("feature", "機能"),
        Rule::any_case("quality", "品質"),
        Rule::any_case("support", "サポート"),
        Rule::any_case("product", "製品"),
        Rule::any_case("service", "サービス"),
        Rule::any_case("company", "会社"),
        Rule::any_case("version", "バージョン"),
        Rule::any_case("update", "アップデート"),
        Rule::any_case("safety", "安全性"),
        Rule::any_case("ethics", "倫理"),
        Rule::any_case("latest", "最新"),
        Rule::any_case("model", "モデル"),
        Rule::any_case("users", "ユーザー"),
        Rule::any_case("today", "今日"),
        Rule::any_case("team", "チーム"),
        Rule::any_case("news", "ニュース"),
        Rule::any_case("blog", "ブログ"),
        Rule::any_case("post", "投稿"),
        Rule::any_case("data", "データ"),
        Rule::any_case("beta", "ベータ"),
        Rule::any_case("new", "新しい"),
        // Brand terms keep their spelling whatever the page's casing.
        Rule::any_case("ChatGPT", "ChatGPT"),
        Rule::any_case("OpenAI", "OpenAI"),
        Rule::any_case("Anthropic", "Anthropic"),
        Rule::any_case("Claude", "Claude"),
        Rule::exact("GPT-4", "GPT-4"),
        Rule::exact("AI", "AI"),
    ])
});

/// Translate `text` with the static rule table.
pub fn translate(text: &str) -> String {
    RULES.translate(text)
}
