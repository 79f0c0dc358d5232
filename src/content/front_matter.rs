// Front matter block and the small text helpers shared by both content paths.

use chrono::{DateTime, Local};

use crate::seo::SeoMetrics;

/// Like Python-style title casing: upper-case a letter that follows a
/// non-letter, lower-case every other letter.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Control characters become spaces, for text placed on a `#` comment line.
fn one_line(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// `48213` -> `48,213`
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `October 19, 2026`
pub fn human_date(at: &DateTime<Local>) -> String {
    at.format("%B %d, %Y").to_string()
}

/// Escape a value for a double-quoted front matter scalar. The result never
/// contains a raw quote or a line break.
fn quoted_scalar(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Metadata header prepended to every post, whichever path produced the body.
pub fn render(keyword: &str, metrics: &SeoMetrics, at: &DateTime<Local>) -> String {
    format!(
        "---\n\
         # Your Friendly Guide to {title}\n\
         # Created on {date}\n\
         #\n\
         # Behind the scenes:\n\
         #   - {volume} searches per month\n\
         #   - Difficulty: {difficulty}/100\n\
         #   - Competition level: {competition}\n\
         \n\
         focus_keyword: \"{keyword}\"\n\
         guide_created: {created}\n\
         ---",
        title = title_case(&one_line(keyword)),
        date = human_date(at),
        volume = group_thousands(metrics.search_volume),
        difficulty = metrics.keyword_difficulty,
        competition = metrics.competition,
        keyword = quoted_scalar(keyword),
        created = at.to_rfc3339(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::{related_keywords_for, Trend};
    use chrono::TimeZone;

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("wireless earbuds"), "Wireless Earbuds");
        assert_eq!(title_case("c++ for BEGINNERS"), "C++ For Beginners");
        assert_eq!(title_case("rust's 2nd edition"), "Rust'S 2Nd Edition");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(50000), "50,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn front_matter_is_fenced_and_carries_metrics() {
        let at = Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let m = SeoMetrics::new(12345, 72, 2.5, related_keywords_for("rust"), Trend::Stable);
        let fm = render("rust", &m, &at);
        assert!(fm.starts_with("---\n"));
        assert!(fm.ends_with("\n---"));
        assert!(fm.contains("focus_keyword: \"rust\""));
        assert!(fm.contains("12,345 searches"));
        assert!(fm.contains("72/100"));
        assert!(fm.contains("Competition level: high"));
        assert!(fm.contains("October 19, 2026"));
    }

    #[test]
    fn keyword_cannot_break_out_of_the_block() {
        let at = Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let m = SeoMetrics::new(500, 10, 1.0, vec![], Trend::Rising);
        let fm = render("a\n---\nb \\ \"c\"\t\u{7}", &m, &at);

        assert_eq!(fm.lines().filter(|l| *l == "---").count(), 2);
        assert!(fm.contains(r#"focus_keyword: "a\n---\nb \\ \"c\"\t\u0007""#), "{fm}");
        assert!(fm.contains("# Your Friendly Guide to A --- B \\ \"C\"  \n"), "{fm}");
    }
}
