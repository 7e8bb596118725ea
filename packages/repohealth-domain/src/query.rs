use time::{Date, Duration, Month, util};

use crate::filter::{FilterSpec, Timeframe};

const EMPTY_QUERY_FALLBACK: &str = "stars:>1";

pub fn build_query(spec: &FilterSpec, today: Date) -> String {
	let mut parts = Vec::new();

	if !spec.terms.is_empty() {
		parts.push(spec.terms.clone());
	}
	if let Some(language) = spec.language.as_deref() {
		parts.push(format!("language:{language}"));
	}
	if let Some(license) = spec.license.as_deref() {
		parts.push(format!("license:{license}"));
	}
	if let Some(stars_min) = spec.stars_min
		&& stars_min > 0
	{
		parts.push(format!("stars:>={stars_min}"));
	}
	if let Some(since) = pushed_since(spec.timeframe, today) {
		parts.push(format!("pushed:>={since}"));
	}

	parts.push("archived:false".to_string());

	for topic in &spec.topics {
		parts.push(format!("topic:{topic}"));
	}

	let query = parts.join(" ");

	if query.is_empty() { EMPTY_QUERY_FALLBACK.to_string() } else { query }
}

fn pushed_since(timeframe: Timeframe, today: Date) -> Option<Date> {
	match timeframe {
		Timeframe::Any => None,
		Timeframe::Week => today.checked_sub(Duration::days(7)),
		Timeframe::Month => match today.month() {
			Month::January => calendar_date(today.year() - 1, Month::December, today.day()),
			month => calendar_date(today.year(), month.previous(), today.day()),
		},
		Timeframe::Year => calendar_date(today.year() - 1, today.month(), today.day()),
	}
}

// Clamps the day so a month or year step backwards from e.g. Mar 31 lands on
// the last day of February instead of overflowing.
fn calendar_date(year: i32, month: Month, day: u8) -> Option<Date> {
	Date::from_calendar_date(year, month, day.min(util::days_in_year_month(year, month))).ok()
}
