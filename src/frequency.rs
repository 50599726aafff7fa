//! Letter frequency counts for a text, compared against the usual frequencies of its language.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrequencyError {
    #[error("unknown language {name:?}, expected one of: english, german")]
    UnknownLanguage { name: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    German,
}

const ENGLISH_ALPHABET: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

const GERMAN_ALPHABET: [char; 30] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ü', 'ß',
];

// Percent of all letters in typical prose.
const ENGLISH_EXPECTED: [(char, f64); 26] = [
    ('e', 12.7),
    ('t', 9.1),
    ('a', 8.2),
    ('o', 7.5),
    ('i', 7.0),
    ('n', 6.7),
    ('s', 6.3),
    ('h', 6.1),
    ('r', 6.0),
    ('d', 4.3),
    ('l', 4.0),
    ('c', 2.8),
    ('u', 2.8),
    ('m', 2.4),
    ('w', 2.4),
    ('f', 2.2),
    ('g', 2.0),
    ('y', 2.0),
    ('p', 1.9),
    ('b', 1.3),
    ('v', 1.0),
    ('k', 0.8),
    ('j', 0.15),
    ('x', 0.15),
    ('q', 0.1),
    ('z', 0.07),
];

const GERMAN_EXPECTED: [(char, f64); 30] = [
    ('e', 17.4),
    ('n', 9.8),
    ('i', 7.5),
    ('s', 7.3),
    ('r', 7.0),
    ('a', 6.5),
    ('t', 6.2),
    ('d', 5.1),
    ('h', 4.8),
    ('u', 4.4),
    ('l', 3.4),
    ('c', 3.1),
    ('g', 3.0),
    ('m', 2.5),
    ('o', 2.5),
    ('b', 1.9),
    ('w', 1.9),
    ('f', 1.7),
    ('k', 1.2),
    ('z', 1.1),
    ('p', 0.8),
    ('v', 0.7),
    ('ü', 0.6),
    ('ä', 0.5),
    ('j', 0.3),
    ('ö', 0.3),
    ('y', 0.04),
    ('x', 0.03),
    ('q', 0.02),
    ('ß', 0.3),
];

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::German];

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::German => "german",
        }
    }

    /// Lowercase letters that are counted, in alphabetical order.
    pub fn alphabet(self) -> &'static [char] {
        match self {
            Language::English => &ENGLISH_ALPHABET,
            Language::German => &GERMAN_ALPHABET,
        }
    }

    /// Usual share of `letter` in percent, `0.0` for letters outside the alphabet.
    pub fn expected_frequency(self, letter: char) -> f64 {
        let table: &[(char, f64)] = match self {
            Language::English => &ENGLISH_EXPECTED,
            Language::German => &GERMAN_EXPECTED,
        };

        table
            .iter()
            .find(|(candidate, _)| *candidate == letter)
            .map_or(0.0, |(_, expected)| *expected)
    }

    /// A pangram-rich paragraph to try the analysis on.
    pub fn sample_text(self) -> &'static str {
        match self {
            Language::English => {
                "The quick brown fox jumps over the lazy dog. This pangram contains every letter \
                 of the English alphabet at least once. It is commonly used for testing \
                 typewriters, computer keyboards, and display fonts. The phrase has been used \
                 since at least the late 19th century and was widely known by the 1930s."
            }
            Language::German => {
                "Franz jagt im komplett verwahrlosten Taxi quer durch Bayern. Dieser deutsche \
                 Pangrammsatz enthält alle Buchstaben des deutschen Alphabets. Die deutsche \
                 Sprache verwendet zusätzlich zu den lateinischen Buchstaben auch Umlaute wie \
                 ä, ö, ü und das Eszett ß. Diese Besonderheiten machen die Frequenzanalyse \
                 interessant."
            }
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = FrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();

        Language::ALL
            .into_iter()
            .find(|language| language.name() == name)
            .ok_or_else(|| FrequencyError::UnknownLanguage { name: s.to_owned() })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LetterFrequency {
    pub letter: char,
    pub count: usize,
    /// Share of all counted letters, in percent.
    pub frequency: f64,
}

impl LetterFrequency {
    /// `frequency` with two decimals, e.g. `12.50%`.
    pub fn percentage(&self) -> String {
        format!("{:.2}%", self.frequency)
    }
}

/// How far one letter is from its usual share.
#[derive(Clone, Debug, PartialEq)]
pub struct Deviation {
    pub letter: char,
    pub actual: f64,
    pub expected: f64,
    /// `|actual - expected|`, in percentage points.
    pub difference: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub language: Language,
    pub total_letters: usize,
    /// Every letter of the alphabet, most frequent first. Ties keep alphabetical order.
    pub letters: Vec<LetterFrequency>,
}

impl Analysis {
    pub fn get(&self, letter: char) -> Option<&LetterFrequency> {
        self.letters.iter().find(|entry| entry.letter == letter)
    }

    /// Number of distinct letters that occurred at least once.
    pub fn unique_letters(&self) -> usize {
        self.letters.iter().filter(|entry| entry.count > 0).count()
    }

    /// Occurring letters ordered by their distance from the expected share, largest first.
    pub fn deviations(&self) -> Vec<Deviation> {
        let mut deviations: Vec<Deviation> = self
            .language
            .alphabet()
            .iter()
            .filter_map(|&letter| self.get(letter))
            .filter(|entry| entry.count > 0)
            .map(|entry| {
                let expected = self.language.expected_frequency(entry.letter);
                Deviation {
                    letter: entry.letter,
                    actual: entry.frequency,
                    expected,
                    difference: (entry.frequency - expected).abs(),
                }
            })
            .collect();

        deviations.sort_by(|a, b| b.difference.total_cmp(&a.difference));
        deviations
    }
}

/// Counts the letters of `language`'s alphabet in `text`, ignoring case. Everything else,
/// digits and punctuation included, is skipped.
pub fn analyze(text: &str, language: Language) -> Analysis {
    let alphabet = language.alphabet();
    let mut counts = vec![0usize; alphabet.len()];

    for c in text.chars().flat_map(char::to_lowercase) {
        if let Some(pos) = alphabet.iter().position(|&letter| letter == c) {
            counts[pos] += 1;
        }
    }

    let total_letters: usize = counts.iter().sum();

    let mut letters: Vec<LetterFrequency> = alphabet
        .iter()
        .zip(counts)
        .map(|(&letter, count)| LetterFrequency {
            letter,
            count,
            frequency: if total_letters > 0 {
                count as f64 / total_letters as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    // Stable, equal counts stay in alphabet order.
    letters.sort_by(|a, b| b.count.cmp(&a.count));

    debug!(%language, total_letters, "analyzed text");

    Analysis {
        language,
        total_letters,
        letters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_ignore_case_and_punctuation() {
        let analysis = analyze("Aa b! 42 c?", Language::English);

        assert_eq!(analysis.total_letters, 4);
        assert_eq!(analysis.unique_letters(), 3);

        let a = analysis.get('a').unwrap();
        assert_eq!(a.count, 2);
        assert_eq!(a.frequency, 50.0);
        assert_eq!(a.percentage(), "50.00%");

        assert_eq!(analysis.get('z').map(|z| z.count), Some(0));
        assert_eq!(analysis.letters.len(), 26);
    }

    #[test]
    fn sorted_most_frequent_first() {
        let analysis = analyze("ccc a bb d", Language::English);
        let order: Vec<char> = analysis.letters.iter().take(5).map(|e| e.letter).collect();

        assert_eq!(order, ['c', 'b', 'a', 'd', 'e']);
    }

    #[test]
    fn german_letters_only_in_german() {
        let text = "Äpfel Größe ß";

        let german = analyze(text, Language::German);
        assert_eq!(german.get('ä').map(|e| e.count), Some(1));
        assert_eq!(german.get('ö').map(|e| e.count), Some(1));
        assert_eq!(german.get('ß').map(|e| e.count), Some(2));
        assert_eq!(german.total_letters, 11);

        let english = analyze(text, Language::English);
        assert_eq!(english.total_letters, 7);
        assert_eq!(english.get('ä'), None);
    }

    #[test]
    fn empty_text() {
        let analysis = analyze("1234 ...", Language::German);

        assert_eq!(analysis.total_letters, 0);
        assert_eq!(analysis.unique_letters(), 0);
        assert!(analysis.letters.iter().all(|e| e.frequency == 0.0));
        assert!(analysis.deviations().is_empty());
    }

    #[test]
    fn deviations_largest_first() {
        // e: 50%, z: 50%. Expected e 12.7, z 0.07.
        let deviations = analyze("ez", Language::English).deviations();

        assert_eq!(deviations.len(), 2);
        assert_eq!(deviations[0].letter, 'z');
        assert!((deviations[0].difference - 49.93).abs() < 1e-9);
        assert_eq!(deviations[1].letter, 'e');
        assert!((deviations[1].difference - 37.3).abs() < 1e-9);
    }

    #[test]
    fn expected_tables_cover_alphabets() {
        for language in Language::ALL {
            assert!(language
                .alphabet()
                .iter()
                .all(|&letter| language.expected_frequency(letter) > 0.0));

            let total: f64 = language
                .alphabet()
                .iter()
                .map(|&letter| language.expected_frequency(letter))
                .sum();
            assert!((95.0..105.0).contains(&total), "{language}: {total}");

            assert!(analyze(language.sample_text(), language).unique_letters() > 20);
        }

        assert_eq!(Language::English.expected_frequency('ß'), 0.0);
    }

    #[test]
    fn parse_language_names() {
        assert_eq!("english".parse::<Language>(), Ok(Language::English));
        assert_eq!(" German ".parse::<Language>(), Ok(Language::German));
        assert_eq!(
            "klingon".parse::<Language>(),
            Err(FrequencyError::UnknownLanguage {
                name: "klingon".to_owned()
            })
        );
    }
}
