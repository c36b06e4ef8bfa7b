//! Buddhist memorial observances (法要) counted from a date of death.

use chrono::NaiveDate;
use tracing::debug;

use super::out_of_range;
use crate::date::{add_days, add_years, to_date_only_string};
use crate::error::CalGenResult;
use crate::event::EventDescriptor;

pub const DEFAULT_UNTIL_YEARS: u32 = 49;
pub const DEFAULT_TITLE_TEMPLATE: &str = "{{houyou}}";

const HOUYOU_TOKEN: &str = "{{houyou}}";
const YEAR_TOKEN: &str = "{{year}}";
const BASE_DATE_TOKEN: &str = "{{base_date}}";

/// Day 0 is the date of death itself.
const DAY_OBSERVANCES: &[(i64, &str)] = &[
    (0, "命日"),
    (6, "初七日"),
    (13, "二七日"),
    (20, "三七日"),
    (27, "四七日"),
    (34, "五七日"),
    (41, "六七日"),
    (48, "七七日(四十九日)"),
    (99, "百か日"),
];

const YEAR_OBSERVANCES: &[(u32, &str)] = &[
    (1, "一周忌"),
    (2, "三回忌"),
    (6, "七回忌"),
    (12, "十三回忌"),
    (16, "十七回忌"),
    (22, "二十三回忌"),
    (26, "二十七回忌"),
    (32, "三十三回忌"),
    (36, "三十七回忌"),
    (49, "五十回忌"),
];

#[derive(Debug, Clone)]
pub struct MemorialParams {
    pub base_date: NaiveDate,
    /// Year observances beyond this many years are left out.
    pub until_years: u32,
    pub include_base_day: bool,
    pub title_template: String,
    pub description: Option<String>,
}

impl MemorialParams {
    pub fn new(base_date: NaiveDate) -> Self {
        MemorialParams {
            base_date,
            until_years: DEFAULT_UNTIL_YEARS,
            include_base_day: true,
            title_template: DEFAULT_TITLE_TEMPLATE.to_string(),
            description: None,
        }
    }
}

pub fn generate(params: &MemorialParams) -> CalGenResult<Vec<EventDescriptor>> {
    let base = params.base_date;
    let base_str = to_date_only_string(base);
    let mut events = Vec::new();

    for &(offset, name) in DAY_OBSERVANCES {
        if offset == 0 && !params.include_base_day {
            continue;
        }
        let date = add_days(base, offset).ok_or_else(|| out_of_range(base, name))?;
        let title = render_title(&params.title_template, name, 0, &base_str);
        events.push(EventDescriptor::all_day(title, date, params.description.clone()));
    }

    for &(years, name) in YEAR_OBSERVANCES {
        if years > params.until_years {
            continue;
        }
        let date = add_years(base, years as i32).ok_or_else(|| out_of_range(base, name))?;
        let title = render_title(&params.title_template, name, years, &base_str);
        events.push(EventDescriptor::all_day(title, date, params.description.clone()));
    }

    events.sort_by_key(|e| e.start.to_date_only_string());

    debug!(base_date = %base_str, count = events.len(), "generated memorial sequence");

    Ok(events)
}

fn render_title(template: &str, houyou: &str, year: u32, base_date: &str) -> String {
    template
        .replace(HOUYOU_TOKEN, houyou)
        .replace(YEAR_TOKEN, &year.to_string())
        .replace(BASE_DATE_TOKEN, base_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn dates_and_titles(events: &[EventDescriptor]) -> Vec<(String, String)> {
        events
            .iter()
            .map(|e| (e.start.to_date_only_string(), e.title.clone()))
            .collect()
    }

    #[test]
    fn default_options_cover_both_tables() {
        let events = generate(&MemorialParams::new(base())).unwrap();
        let entries = dates_and_titles(&events);

        assert_eq!(events.len(), DAY_OBSERVANCES.len() + YEAR_OBSERVANCES.len());
        assert_eq!(entries[0], ("2024-01-01".into(), "命日".into()));
        assert_eq!(entries[1], ("2024-01-07".into(), "初七日".into()));
        assert_eq!(entries[7], ("2024-02-18".into(), "七七日(四十九日)".into()));
        assert_eq!(entries[8], ("2024-04-09".into(), "百か日".into()));
        assert_eq!(entries[9], ("2025-01-01".into(), "一周忌".into()));
        assert_eq!(
            entries.last().unwrap(),
            &("2073-01-01".to_string(), "五十回忌".to_string())
        );
    }

    #[test]
    fn generation_is_deterministic() {
        let params = MemorialParams {
            title_template: "{{houyou}} {{base_date}}".to_string(),
            ..MemorialParams::new(base())
        };
        assert_eq!(generate(&params).unwrap(), generate(&params).unwrap());
    }

    #[test]
    fn output_is_sorted_by_date() {
        let events = generate(&MemorialParams::new(base())).unwrap();
        let dates: Vec<_> = events.iter().map(|e| e.start.to_date_only_string()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn events_are_all_day() {
        let events = generate(&MemorialParams::new(base())).unwrap();
        assert!(events.iter().all(|e| e.start.is_all_day() && e.start == e.end));
    }

    #[test]
    fn until_years_drops_later_year_observances() {
        let mut params = MemorialParams::new(base());
        params.until_years = 1;
        let events = generate(&params).unwrap();

        assert_eq!(events.len(), DAY_OBSERVANCES.len() + 1);
        assert_eq!(events.last().unwrap().title, "一周忌");
    }

    #[test]
    fn until_zero_keeps_only_day_observances() {
        let mut params = MemorialParams::new(base());
        params.until_years = 0;
        assert_eq!(generate(&params).unwrap().len(), DAY_OBSERVANCES.len());
    }

    #[test]
    fn base_day_can_be_excluded() {
        let mut params = MemorialParams::new(base());
        params.include_base_day = false;
        let events = generate(&params).unwrap();

        assert!(events.iter().all(|e| e.title != "命日"));
        assert_eq!(events[0].start.to_date_only_string(), "2024-01-07");
    }

    #[test]
    fn template_placeholders_are_replaced() {
        let mut params = MemorialParams::new(base());
        params.title_template = "{{houyou}} ({{year}}年 / {{base_date}}) {{houyou}}".to_string();
        let events = generate(&params).unwrap();

        assert_eq!(events[1].title, "初七日 (0年 / 2024-01-01) 初七日");
        assert_eq!(events[10].title, "三回忌 (2年 / 2024-01-01) 三回忌");
    }

    #[test]
    fn description_is_carried_through() {
        let mut params = MemorialParams::new(base());
        params.description = Some("菩提寺に連絡".to_string());
        let events = generate(&params).unwrap();
        assert!(events.iter().all(|e| e.description.as_deref() == Some("菩提寺に連絡")));
    }

    #[test]
    fn leap_day_base_rolls_year_observances() {
        let params = MemorialParams::new(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let events = generate(&params).unwrap();
        let first_anniversary = events.iter().find(|e| e.title == "一周忌").unwrap();
        assert_eq!(first_anniversary.start.to_date_only_string(), "2025-03-01");
    }
}
