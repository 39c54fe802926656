use std::collections::HashSet;

use proptest::prelude::*;

use placement_scraper::source::default_sources;
use placement_scraper::{extract_graduates, extract_placements};

const NOISE: [&str; 5] = ["copyright", "university", "college", "school", "department"];

fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-z]{1,12} [A-Z][a-z]{1,12}: [A-Za-z ]{3,30}, [A-Z][A-Za-z ]{3,30}",
        "[A-Z][a-z]{1,12} [A-Z][a-z]{1,12}: [A-Za-z ]{3,30} at [A-Za-z ]{3,30}",
        "Dr\\. [A-Z][a-z]{1,12} [A-Z][a-z]{1,12} is an? [A-Za-z ]{3,20} at [A-Z][a-z ]{3,20}",
        "[A-Z][A-Za-z .'-]{0,70}[:,] [A-Za-z ,]{0,80}",
        "(19|20)[0-9]{2}",
        "[A-Za-z0-9 ()]{0,60}",
    ]
}

fn page_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 0..40).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn placement_names_are_bounded_and_clean(page in page_strategy()) {
        for p in extract_placements(&page, &default_sources()[0]) {
            let len = p.name.chars().count();
            prop_assert!((3..=50).contains(&len), "name {:?}", p.name);
            let lower = p.name.to_lowercase();
            prop_assert!(NOISE.iter().all(|n| !lower.contains(n)), "name {:?}", p.name);
        }
    }

    #[test]
    fn placement_extraction_is_idempotent(page in page_strategy()) {
        let source = &default_sources()[0];
        prop_assert_eq!(extract_placements(&page, source), extract_placements(&page, source));
    }

    #[test]
    fn placement_names_are_unique(page in page_strategy()) {
        let out = extract_placements(&page, &default_sources()[0]);
        let keys: HashSet<String> = out.iter().map(|p| p.name.trim().to_lowercase()).collect();
        prop_assert_eq!(keys.len(), out.len());
    }

    #[test]
    fn graduate_year_is_nearest_marker_above(lines in prop::collection::vec(year_page_line(), 0..60)) {
        let mut text = Vec::new();
        let mut expected = Vec::new();
        let mut year = None;
        for (i, line) in lines.iter().enumerate() {
            match line {
                YearPageLine::Year(y) => {
                    year = Some(*y);
                    text.push(y.to_string());
                }
                YearPageLine::Person => {
                    let name = format!("Person{i} Example");
                    if let Some(y) = year {
                        expected.push((name.clone(), y));
                    }
                    text.push(name);
                }
                YearPageLine::Noise(n) => text.push(n.to_string()),
            }
        }

        let got: Vec<(String, u16)> = extract_graduates(&text.join("\n"))
            .into_iter()
            .map(|g| (g.name, g.graduation_year))
            .collect();
        prop_assert_eq!(got, expected);
    }
}

#[derive(Debug, Clone)]
enum YearPageLine {
    Year(u16),
    Person,
    Noise(&'static str),
}

fn year_page_line() -> impl Strategy<Value = YearPageLine> {
    prop_oneof![
        (2010u16..2030).prop_map(YearPageLine::Year),
        Just(YearPageLine::Person),
        prop::sample::select(vec!["LinkedIn", "Contact us", "Cookie settings", "Newsletter sign-up", "Madonna", "2031", ""])
            .prop_map(YearPageLine::Noise),
    ]
}
