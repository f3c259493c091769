//! Readability pass over raw captions.
//!
//! Auto-generated YouTube captions arrive as short, lowercase, unpunctuated
//! fragments. The formatter merges them into sentence-like units using a few
//! cheap cues (existing punctuation, silence gaps, capitalized words and size
//! limits) and then fixes up casing and closes bare sentences with a period.
//! It never drops, rewrites or reorders tokens.

use super::models::{CaptionSegment, FormattedSegment};
use crate::config::FormattingSettings;

const SENTENCE_END: [char; 4] = ['.', '!', '?', '…'];

/// Merges raw caption segments into readable, timestamped units.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    settings: FormattingSettings,
}

/// A unit being accumulated.
struct Unit {
    start: f64,
    end: f64,
    text: String,
    chars: usize,
    is_cue: bool,
}

impl Unit {
    fn open(segment: &CaptionSegment, text: String) -> Self {
        Self {
            start: segment.start_seconds,
            end: segment.end_seconds(),
            chars: text.chars().count(),
            is_cue: is_cue(&text),
            text,
        }
    }

    fn extend(&mut self, segment: &CaptionSegment, text: &str) {
        self.text.push(' ');
        self.text.push_str(text);
        self.chars += 1 + text.chars().count();
        self.end = segment.end_seconds().max(self.start);
        self.is_cue = false;
    }

    fn finish(self) -> FormattedSegment {
        FormattedSegment::new(self.start, self.end, punctuate(&self.text))
    }
}

impl Formatter {
    pub fn new(settings: FormattingSettings) -> Self {
        Self { settings }
    }

    /// Format captions that are already in start order.
    pub fn format(&self, segments: &[CaptionSegment]) -> Vec<FormattedSegment> {
        let mut units = Vec::new();
        let mut current: Option<Unit> = None;

        for segment in segments {
            let text = normalize_whitespace(&segment.text);
            if text.is_empty() {
                continue;
            }

            current = match current.take() {
                Some(unit) if self.is_boundary(&unit, segment, &text) => {
                    units.push(unit.finish());
                    Some(Unit::open(segment, text))
                }
                Some(mut unit) => {
                    unit.extend(segment, &text);
                    Some(unit)
                }
                None => Some(Unit::open(segment, text)),
            };
        }

        if let Some(unit) = current {
            units.push(unit.finish());
        }

        units
    }

    /// Whether `next` should start a new unit instead of extending `unit`.
    fn is_boundary(&self, unit: &Unit, next: &CaptionSegment, next_text: &str) -> bool {
        if unit.is_cue || is_cue(next_text) {
            return true;
        }

        if unit.text.ends_with(SENTENCE_END) {
            return true;
        }

        let gap = next.start_seconds - unit.end;
        if gap > self.settings.silence_gap_seconds {
            return true;
        }

        let chars = unit.chars + 1 + next_text.chars().count();
        if chars > self.settings.max_unit_chars {
            return true;
        }

        if next.end_seconds() - unit.start > self.settings.max_unit_seconds {
            return true;
        }

        unit.chars >= self.settings.min_unit_chars && starts_capitalized(next_text)
    }
}

/// Collapse runs of whitespace (including caption line breaks) to single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Bracketed sound cues such as `[Music]` or `[Applause]`.
fn is_cue(text: &str) -> bool {
    text.starts_with('[') && text.ends_with(']')
}

fn starts_capitalized(text: &str) -> bool {
    let first_word = text.split(' ').next().unwrap_or_default();
    if is_first_person(first_word) {
        return false;
    }
    first_word.chars().next().is_some_and(char::is_uppercase)
}

fn is_first_person(word: &str) -> bool {
    let lower = word.to_lowercase();
    let stem = lower.split(['\'', '’']).next().unwrap_or_default();
    stem == "i"
}

/// Capitalize the opening letter, promote a lone `i`, and end a bare word with `.`.
///
/// Trailing punctuation that is already there (`,`, `-`, `>>`, a closing
/// bracket or quote) is kept as is.
fn punctuate(text: &str) -> String {
    let mut words: Vec<String> = text
        .split(' ')
        .map(|word| {
            if is_first_person(word) {
                capitalize(word)
            } else {
                word.to_string()
            }
        })
        .collect();

    if let Some(first) = words.first_mut() {
        *first = capitalize(first);
    }

    let mut out = words.join(" ");
    if out.chars().last().is_some_and(char::is_alphanumeric) {
        out.push('.');
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            let mut upper = first.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => std::iter::once(single).chain(chars).collect(),
                _ => word.to_string(),
            }
        }
        _ => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, duration: f64, text: &str) -> CaptionSegment {
        CaptionSegment::new(start, duration, text)
    }

    /// Every raw token survives in order, differing only in case or by one
    /// period appended to the last token of a unit.
    fn assert_faithful(segments: &[CaptionSegment], formatted: &[FormattedSegment]) {
        let raw: Vec<String> = segments
            .iter()
            .flat_map(|s| s.text.split_whitespace())
            .map(str::to_lowercase)
            .collect();

        let mut out = Vec::new();
        for unit in formatted {
            assert_eq!(unit.text, normalize_whitespace(&unit.text));
            let tokens: Vec<&str> = unit.text.split(' ').collect();
            let last = tokens.len() - 1;
            for (i, token) in tokens.iter().enumerate() {
                out.push((token.to_lowercase(), i == last));
            }
        }

        assert_eq!(raw.len(), out.len(), "{:?} vs {:?}", raw, out);
        for (raw_token, (token, is_last)) in raw.iter().zip(&out) {
            if raw_token != token {
                assert!(
                    *is_last && *token == format!("{}.", raw_token),
                    "{:?} became {:?}",
                    raw_token,
                    token
                );
            }
        }
    }

    #[test]
    fn test_merges_continuous_speech() {
        let segments = vec![
            seg(0.0, 2.0, "so thank you for that introduction every"),
            seg(2.0, 2.0, "time i speak at another event i always"),
            seg(4.0, 2.0, "ask if there'll be lasers"),
        ];

        let formatted = Formatter::default().format(&segments);

        assert_eq!(formatted.len(), 1);
        assert_eq!(formatted[0].timestamp_seconds, 0.0);
        assert_eq!(formatted[0].end_seconds, 6.0);
        assert!(formatted[0].text.starts_with("So thank you"));
        assert!(formatted[0].text.contains(" I speak"));
        assert!(formatted[0].text.ends_with('.'));
        assert_faithful(&segments, &formatted);
    }

    #[test]
    fn test_silence_gap_splits() {
        let segments = vec![
            seg(0.0, 2.0, "hello world"),
            seg(10.0, 2.0, "goodbye"),
            seg(20.0, 2.0, "hello again"),
        ];

        let formatted = Formatter::default().format(&segments);

        let starts: Vec<f64> = formatted.iter().map(|s| s.timestamp_seconds).collect();
        assert_eq!(starts, vec![0.0, 10.0, 20.0]);
        assert_eq!(formatted[1].end_seconds, 12.0);
        assert_faithful(&segments, &formatted);
    }

    #[test]
    fn test_existing_punctuation_closes_unit() {
        let segments = vec![
            seg(0.0, 5.0, "First part."),
            seg(5.0, 7.0, "Second part!"),
            seg(12.0, 8.0, "third part"),
        ];

        let formatted = Formatter::default().format(&segments);

        assert_eq!(formatted.len(), 3);
        assert_eq!(formatted[0].text, "First part.");
        assert_eq!(formatted[2].text, "Third part.");
        assert_eq!(formatted[2].end_seconds, 20.0);
    }

    #[test]
    fn test_length_limit_chunks() {
        let settings = FormattingSettings {
            max_unit_chars: 20,
            ..FormattingSettings::default()
        };
        let segments: Vec<_> = (0..6)
            .map(|i| seg(i as f64, 1.0, "one two three"))
            .collect();

        let formatted = Formatter::new(settings).format(&segments);

        assert!(formatted.len() > 1);
        assert!(formatted.iter().all(|s| s.text.chars().count() <= 21));
        assert_faithful(&segments, &formatted);
    }

    #[test]
    fn test_duration_limit_chunks() {
        let settings = FormattingSettings {
            max_unit_seconds: 5.0,
            ..FormattingSettings::default()
        };
        let segments: Vec<_> = (0..10).map(|i| seg(i as f64, 1.0, "word")).collect();

        let formatted = Formatter::new(settings).format(&segments);

        assert!(formatted.len() >= 2);
        assert!(formatted.iter().all(|s| s.end_seconds - s.timestamp_seconds <= 5.0));
    }

    #[test]
    fn test_capitalized_word_splits_after_minimum() {
        let settings = FormattingSettings {
            min_unit_chars: 10,
            ..FormattingSettings::default()
        };
        let segments = vec![
            seg(0.0, 1.0, "this is a long enough opening"),
            seg(1.0, 1.0, "Then something new"),
            seg(2.0, 1.0, "I think it continues"),
        ];

        let formatted = Formatter::new(settings).format(&segments);

        assert_eq!(formatted.len(), 2);
        assert_eq!(formatted[1].timestamp_seconds, 1.0);
        assert!(formatted[1].text.contains("new I think"));
    }

    #[test]
    fn test_cues_stand_alone() {
        let segments = vec![
            seg(0.0, 2.0, "[Music]"),
            seg(2.0, 2.0, "welcome back"),
            seg(4.0, 1.0, "[Applause]"),
        ];

        let formatted = Formatter::default().format(&segments);

        let texts: Vec<_> = formatted.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["[Music]", "Welcome back.", "[Applause]"]);
    }

    #[test]
    fn test_whitespace_and_empty_segments() {
        let segments = vec![
            seg(0.0, 1.0, "  line one\nline   two "),
            seg(1.0, 1.0, "   "),
            seg(2.0, 1.0, "three,"),
        ];

        let formatted = Formatter::default().format(&segments);

        assert_eq!(formatted.len(), 1);
        assert_eq!(formatted[0].text, "Line one line two three,");
        assert_eq!(formatted[0].end_seconds, 3.0);
    }

    #[test]
    fn test_standalone_punctuation_is_kept() {
        let formatter = Formatter::default();

        let trailing_dash = vec![seg(0.0, 1.0, "so"), seg(1.0, 1.0, "-")];
        let formatted = formatter.format(&trailing_dash);
        assert_eq!(formatted[0].text, "So -");
        assert_faithful(&trailing_dash, &formatted);

        let lone_dash = vec![seg(0.0, 1.0, "-")];
        let formatted = formatter.format(&lone_dash);
        assert_eq!(formatted[0].text, "-");

        let speaker_change = vec![
            seg(0.0, 1.0, ">>"),
            seg(1.0, 1.0, "so -"),
            seg(2.0, 1.0, "we start; then"),
            seg(3.0, 1.0, "world,"),
        ];
        let formatted = formatter.format(&speaker_change);
        assert_eq!(formatted[0].text, ">> so - we start; then world,");
        assert_faithful(&speaker_change, &formatted);
    }

    #[test]
    fn test_bare_sentence_gets_period() {
        let segments = vec![seg(0.0, 1.0, "i think so"), seg(5.0, 1.0, "(laughs)")];
        let formatted = Formatter::default().format(&segments);

        let texts: Vec<_> = formatted.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["I think so.", "(laughs)"]);
        assert_faithful(&segments, &formatted);
    }

    #[test]
    fn test_empty_input() {
        assert!(Formatter::default().format(&[]).is_empty());
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let segments: Vec<_> = (0..50)
            .map(|i| {
                let text = if i % 7 == 0 { "And so." } else { "more words here" };
                seg(i as f64 * 1.7, 1.5, text)
            })
            .collect();

        let formatted = Formatter::default().format(&segments);

        assert!(formatted
            .windows(2)
            .all(|w| w[0].timestamp_seconds <= w[1].timestamp_seconds));
        assert_faithful(&segments, &formatted);
    }
}
