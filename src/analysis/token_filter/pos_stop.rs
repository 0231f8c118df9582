//! Part-of-speech stop filter.
//!
//! Drops tokens whose part-of-speech tuple matches one of a set of
//! hierarchical stop tag patterns. A pattern is a prefix of a POS tuple:
//! `助詞` matches every particle, `助詞,格助詞` only case particles. A `*`
//! field matches anything at that position.
//!
//! # Examples
//!
//! ```
//! use wakachi::analysis::morpheme::{Morpheme, PartOfSpeech};
//! use wakachi::analysis::token::Token;
//! use wakachi::analysis::token_filter::Filter;
//! use wakachi::analysis::token_filter::pos_stop::PartOfSpeechStopFilter;
//!
//! let filter = PartOfSpeechStopFilter::from_tags(["助詞", "名詞,非自立"]).unwrap();
//! let token = |text: &str, pos: &str| {
//!     let pos: PartOfSpeech = pos.parse().unwrap();
//!     Token::new(text, 0).with_morpheme(Morpheme::new(text, 0, 1).with_part_of_speech(pos))
//! };
//! let tokens = vec![
//!     token("もも", "名詞,一般"),
//!     token("の", "助詞,連体化"),
//!     token("うち", "名詞,非自立,副詞可能"),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "もも");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use ahash::AHashMap;
use log::debug;

use crate::analysis::morpheme::{MAX_POS_FIELDS, POS_WILDCARD, PartOfSpeech};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::{Result, WakachiError};

/// Default stop tags for UniDic-style part-of-speech tuples.
pub const DEFAULT_STOP_TAGS: &[&str] = &[
    "接続詞",
    "助動詞",
    "助詞",
    "補助記号",
    "空白",
    "感動詞,フィラー",
];

/// Matcher built once from [`DEFAULT_STOP_TAGS`].
static DEFAULT_STOP_TAG_MATCHER: LazyLock<Arc<StopTagMatcher>> = LazyLock::new(|| {
    let matcher = StopTagMatcher::from_tags(DEFAULT_STOP_TAGS).expect("default stop tags are valid");
    Arc::new(matcher)
});

/// A prefix pattern over a part-of-speech tuple.
///
/// Holds 1 to 6 fields; `None` is a wildcard.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StopTagPattern {
    fields: Vec<Option<String>>,
}

impl StopTagPattern {
    /// Create a pattern from its fields; `"*"` and empty fields are wildcards.
    ///
    /// Fails if there are no fields or more than six.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields: Vec<Option<String>> = fields
            .into_iter()
            .map(|f| {
                let f = f.as_ref().trim();
                if f.is_empty() || f == POS_WILDCARD {
                    None
                } else {
                    Some(f.to_string())
                }
            })
            .collect();

        if fields.is_empty() {
            return Err(WakachiError::invalid_config("stop tag pattern has no fields"));
        }
        if fields.len() > MAX_POS_FIELDS {
            return Err(WakachiError::invalid_config(format!(
                "stop tag pattern '{}' has {} fields, at most {} are allowed",
                Self::join(&fields),
                fields.len(),
                MAX_POS_FIELDS
            )));
        }
        Ok(StopTagPattern { fields })
    }

    /// Number of fields in the pattern.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First field, unless it is a wildcard.
    pub fn head(&self) -> Option<&str> {
        self.fields.first().and_then(|f| f.as_deref())
    }

    /// Returns true if `pos` agrees with every literal field of the pattern.
    pub fn matches(&self, pos: &PartOfSpeech) -> bool {
        self.fields.iter().enumerate().all(|(i, field)| match field {
            None => true,
            Some(literal) => pos.get(i) == Some(literal.as_str()),
        })
    }

    fn join(fields: &[Option<String>]) -> String {
        fields
            .iter()
            .map(|f| f.as_deref().unwrap_or(POS_WILDCARD))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromStr for StopTagPattern {
    type Err = WakachiError;

    /// Parse a comma-joined pattern such as `名詞,*,*,サ変可能`.
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(WakachiError::invalid_config("stop tag pattern is empty"));
        }
        StopTagPattern::new(s.split(','))
    }
}

impl fmt::Display for StopTagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::join(&self.fields))
    }
}

/// A set of stop tag patterns.
///
/// Patterns are grouped by their first field so that a lookup only tests
/// the patterns that can possibly match.
#[derive(Clone, Debug, Default)]
pub struct StopTagMatcher {
    by_head: AHashMap<String, Vec<StopTagPattern>>,
    any_head: Vec<StopTagPattern>,
    len: usize,
}

impl StopTagMatcher {
    pub fn new<I>(patterns: I) -> Self
    where
        I: IntoIterator<Item = StopTagPattern>,
    {
        let mut matcher = StopTagMatcher::default();
        for pattern in patterns {
            match pattern.head() {
                Some(head) => matcher
                    .by_head
                    .entry(head.to_string())
                    .or_default()
                    .push(pattern),
                None => matcher.any_head.push(pattern),
            }
            matcher.len += 1;
        }
        matcher
    }

    /// Parse every tag and build a matcher, failing on the first invalid tag.
    pub fn from_tags<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = tags
            .into_iter()
            .map(|tag| tag.as_ref().parse::<StopTagPattern>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(patterns))
    }

    /// Returns true if `pos` matches at least one pattern.
    pub fn matches(&self, pos: &PartOfSpeech) -> bool {
        let candidates = pos
            .get(0)
            .and_then(|head| self.by_head.get(head))
            .map(Vec::as_slice)
            .unwrap_or_default();
        candidates
            .iter()
            .chain(&self.any_head)
            .any(|pattern| pattern.matches(pos))
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A filter that removes tokens whose part of speech matches a stop tag.
///
/// Tokens without a morpheme are kept. Text is never modified.
#[derive(Clone, Debug)]
pub struct PartOfSpeechStopFilter {
    matcher: Arc<StopTagMatcher>,
}

impl PartOfSpeechStopFilter {
    pub fn new(matcher: StopTagMatcher) -> Self {
        PartOfSpeechStopFilter {
            matcher: Arc::new(matcher),
        }
    }

    /// Build a filter from comma-joined tag strings.
    pub fn from_tags<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matcher = StopTagMatcher::from_tags(tags)?;
        debug!("part-of-speech stop filter with {} patterns", matcher.len());
        Ok(Self::new(matcher))
    }

    /// Build a filter with [`DEFAULT_STOP_TAGS`].
    pub fn with_default_tags() -> Self {
        PartOfSpeechStopFilter {
            matcher: Arc::clone(&DEFAULT_STOP_TAG_MATCHER),
        }
    }

    pub fn matcher(&self) -> &StopTagMatcher {
        &self.matcher
    }
}

impl Filter for PartOfSpeechStopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let matcher = Arc::clone(&self.matcher);
        Ok(Box::new(tokens.filter(move |token| {
            !token
                .part_of_speech()
                .is_some_and(|pos| matcher.matches(pos))
        })))
    }

    fn name(&self) -> &'static str {
        "pos_stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::morpheme::Morpheme;
    use crate::analysis::token::Token;

    fn pos(s: &str) -> PartOfSpeech {
        s.parse().unwrap()
    }

    #[test]
    fn test_prefix_pattern() {
        let verb: StopTagPattern = "動詞".parse().unwrap();
        assert!(verb.matches(&pos("動詞,一般,*,*,五段-カ行,連用形-一般")));
        assert!(verb.matches(&pos("動詞,非自立可能")));
        assert!(verb.matches(&pos("動詞")));
        assert!(!verb.matches(&pos("名詞,普通名詞,サ変可能")));
        assert!(!verb.matches(&PartOfSpeech::default()));
    }

    #[test]
    fn test_full_pattern_matches_exact_tuple() {
        let pattern: StopTagPattern = "動詞,一般,*,*,五段-カ行,連用形-一般".parse().unwrap();
        assert_eq!(pattern.len(), 6);
        assert!(pattern.matches(&pos("動詞,一般,*,*,五段-カ行,連用形-一般")));
        assert!(!pattern.matches(&pos("動詞,一般,*,*,五段-カ行,終止形-一般")));
        assert!(!pattern.matches(&pos("動詞,一般")));
    }

    #[test]
    fn test_wildcard_fields() {
        let pattern: StopTagPattern = "名詞,*,*,サ変可能".parse().unwrap();
        assert!(pattern.matches(&pos("名詞,普通名詞,一般,サ変可能")));
        assert!(pattern.matches(&pos("名詞,*,*,サ変可能")));
        assert!(!pattern.matches(&pos("名詞,普通名詞,一般,形状詞可能")));

        let any_head: StopTagPattern = ",格助詞".parse().unwrap();
        assert_eq!(any_head.head(), None);
        assert!(any_head.matches(&pos("助詞,格助詞")));
        assert_eq!(any_head.to_string(), "*,格助詞");
    }

    #[test]
    fn test_pattern_field_limits() {
        let err = "a,b,c,d,e,f,g".parse::<StopTagPattern>().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("7 fields"));

        assert!("".parse::<StopTagPattern>().is_err());
        assert!(StopTagPattern::new(Vec::<String>::new()).is_err());
        assert!(StopTagMatcher::from_tags(["助詞", "1,2,3,4,5,6,7"]).is_err());
    }

    #[test]
    fn test_matcher() {
        let matcher = StopTagMatcher::from_tags(["助詞,格助詞", "*,*,*,*,*,連体形-一般", "記号"]).unwrap();
        assert_eq!(matcher.len(), 3);
        assert!(matcher.matches(&pos("助詞,格助詞")));
        assert!(!matcher.matches(&pos("助詞,係助詞")));
        assert!(matcher.matches(&pos("動詞,一般,*,*,下一段-ア行,連体形-一般")));
        assert!(matcher.matches(&pos("記号,句点")));
        assert!(!matcher.matches(&pos("名詞")));
        assert!(StopTagMatcher::default().is_empty());
    }

    #[test]
    fn test_filter_keeps_tokens_without_morpheme() {
        let filter = PartOfSpeechStopFilter::from_tags(["助詞"]).unwrap();
        let tokens = vec![
            Token::new("が", 0).with_morpheme(Morpheme::new("が", 0, 1).with_part_of_speech(pos("助詞,格助詞"))),
            Token::new("raw", 1),
            Token::new("猫", 2).with_morpheme(Morpheme::new("猫", 1, 2).with_part_of_speech(pos("名詞,普通名詞,一般"))),
        ];

        let result: Vec<String> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();
        assert_eq!(result, vec!["raw", "猫"]);
    }

    #[test]
    fn test_default_tags() {
        let filter = PartOfSpeechStopFilter::with_default_tags();
        assert_eq!(filter.matcher().len(), DEFAULT_STOP_TAGS.len());
        for tag in DEFAULT_STOP_TAGS {
            assert!(tag.parse::<StopTagPattern>().is_ok(), "{tag}");
        }
        let again = PartOfSpeechStopFilter::with_default_tags();
        assert!(Arc::ptr_eq(&filter.matcher, &again.matcher));
        assert!(filter.matcher().matches(&pos("助動詞")));
        assert!(filter.matcher().matches(&pos("感動詞,フィラー")));
        assert!(!filter.matcher().matches(&pos("感動詞,一般")));
        assert_eq!(filter.name(), "pos_stop");
    }
}
