//! Inline span tokenizer for paragraph text.
//!
//! Recognises `**bold**`, `__bold__`, `_italic_`, `*italic*` and `` `code` ``.
//! At every position the leftmost opening marker wins, ties are broken by
//! the order listed above, and the interior is the shortest run up to the
//! next closing marker on the same line. Markers never nest.

use crate::block::Span;

#[derive(Clone, Copy)]
enum Emphasis {
    Bold,
    Italic,
    Code,
}

struct Marker {
    delim: &'static str,
    emphasis: Emphasis,
}

const MARKER_COUNT: usize = 5;

static MARKERS: [Marker; MARKER_COUNT] = [
    Marker {
        delim: "**",
        emphasis: Emphasis::Bold,
    },
    Marker {
        delim: "__",
        emphasis: Emphasis::Bold,
    },
    Marker {
        delim: "_",
        emphasis: Emphasis::Italic,
    },
    Marker {
        delim: "*",
        emphasis: Emphasis::Italic,
    },
    Marker {
        delim: "`",
        emphasis: Emphasis::Code,
    },
];

/// Split paragraph text into plain and formatted spans.
pub fn tokenize(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut scanner = Scanner::new(text);
    let mut plain_start = 0;

    while let Some(found) = scanner.next_match() {
        if found.start > plain_start {
            spans.push(Span::Text(text[plain_start..found.start].to_string()));
        }
        spans.push(found.span);
        plain_start = found.end;
    }

    if plain_start < text.len() {
        spans.push(Span::Text(text[plain_start..].to_string()));
    }

    spans
}

struct Match {
    start: usize,
    end: usize,
    span: Span,
}

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    // Per marker: once a closing delimiter is missing from some offset on,
    // it is missing from every later offset too.
    no_close_from: [usize; MARKER_COUNT],
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            no_close_from: [usize::MAX; MARKER_COUNT],
        }
    }

    fn next_match(&mut self) -> Option<Match> {
        let bytes = self.text.as_bytes();
        let mut start = self.pos;

        while start < bytes.len() {
            // All delimiters are ASCII, so `start` is a char boundary here.
            if matches!(bytes[start], b'*' | b'_' | b'`') {
                for index in 0..MARKER_COUNT {
                    if let Some(found) = self.try_marker(index, start) {
                        self.pos = found.end;
                        return Some(found);
                    }
                }
            }
            start += 1;
        }

        self.pos = bytes.len();
        None
    }

    fn try_marker(&mut self, index: usize, start: usize) -> Option<Match> {
        let marker = &MARKERS[index];
        if !self.text[start..].starts_with(marker.delim) {
            return None;
        }

        let inner_start = start + marker.delim.len();
        if inner_start >= self.no_close_from[index] {
            return None;
        }

        let Some(offset) = self.text[inner_start..].find(marker.delim) else {
            self.no_close_from[index] = inner_start;
            return None;
        };

        let inner = &self.text[inner_start..inner_start + offset];
        if inner.contains('\n') {
            return None;
        }

        let span = match marker.emphasis {
            Emphasis::Bold => Span::Bold(inner.to_string()),
            Emphasis::Italic => Span::Italic(inner.to_string()),
            Emphasis::Code => Span::Code(inner.to_string()),
        };

        Some(Match {
            start,
            end: inner_start + offset + marker.delim.len(),
            span,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }
    fn bold(s: &str) -> Span {
        Span::Bold(s.to_string())
    }
    fn italic(s: &str) -> Span {
        Span::Italic(s.to_string())
    }
    fn code(s: &str) -> Span {
        Span::Code(s.to_string())
    }

    #[test]
    fn mixed_markers_in_priority_order() {
        assert_eq!(
            tokenize("**bold** and _ital_ and `code`"),
            vec![
                bold("bold"),
                text(" and "),
                italic("ital"),
                text(" and "),
                code("code"),
            ]
        );
    }

    #[test]
    fn unterminated_marker_is_literal() {
        assert_eq!(
            tokenize("text *open forever"),
            vec![text("text *open forever")]
        );
    }

    #[test]
    fn empty_input_has_no_spans() {
        assert_eq!(tokenize(""), Vec::<Span>::new());
    }

    #[rstest]
    #[case("__strong__", vec![bold("strong")])]
    #[case("*soft*", vec![italic("soft")])]
    #[case("**  **", vec![bold("  ")])]
    #[case("**", vec![italic("")])]
    #[case("a**b**c", vec![text("a"), bold("b"), text("c")])]
    #[case("**a** **b**", vec![bold("a"), text(" "), bold("b")])]
    #[case("`a*b*c`", vec![code("a*b*c")])]
    #[case("*a `b* c`", vec![italic("a `b"), text(" c`")])]
    #[case("__a_", vec![italic(""), text("a_")])]
    #[case("snake_case_name", vec![text("snake"), italic("case"), text("name")])]
    #[case("**bold *inner* still**", vec![bold("bold *inner* still")])]
    #[case("price: 5 * 3", vec![text("price: 5 * 3")])]
    fn tokenizes(#[case] input: &str, #[case] expected: Vec<Span>) {
        assert_eq!(tokenize(input), expected);
    }

    #[test]
    fn leftmost_marker_wins_over_priority() {
        // `_` opens before `**`, so the italic run swallows the asterisks.
        assert_eq!(
            tokenize("_x **y** z_"),
            vec![italic("x **y** z")]
        );
    }

    #[test]
    fn interior_stops_at_line_break() {
        assert_eq!(tokenize("*a\nb*"), vec![text("*a\nb*")]);
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(
            tokenize("café **crème** • fin"),
            vec![text("café "), bold("crème"), text(" • fin")]
        );
    }

    #[test]
    fn lone_openers_of_every_kind_stay_literal() {
        let input = "* _ ` done";
        assert_eq!(tokenize(input), vec![text(input)]);
    }

    #[test]
    fn long_runs_of_one_marker_pair_up() {
        let input = "*".repeat(1001);
        let spans = tokenize(&input);
        // 250 `**…**` pairs with empty interiors, then one stray `*`.
        assert_eq!(spans.len(), 251);
        assert_eq!(spans[0], bold(""));
        assert_eq!(spans[250], text("*"));
    }
}
