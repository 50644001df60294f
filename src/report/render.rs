// src/report/render.rs

use crate::domain::PropertyRecord;
use crate::report::format::{
    escape_html, format_gap, format_price, group_thousands, truncate_with_ellipsis,
};
use chrono::NaiveDate;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const URL_PREVIEW_CHARS: usize = 50;

/// Renders the daily report for one profile.
///
/// `all` only feeds the "tracked" total; every other number comes from
/// `ranked`. The date is passed in so identical inputs give identical text.
pub fn render_report(
    profile: &str,
    all: &[PropertyRecord],
    ranked: &[&PropertyRecord],
    today: NaiveDate,
) -> String {
    let mut report = String::new();

    report.push_str("🏠 <b>DAILY REAL ESTATE REPORT</b>\n");
    report.push_str(&format!("📍 Profile: {}\n", escape_html(profile)));
    report.push_str(&format!("📅 {}\n", today.format("%A, %B %-d, %Y")));
    report.push_str(RULE);
    report.push_str("\n\n");

    report.push_str(&format!(
        "<b>🏗️ TOP {} NEWEST PROPERTIES</b>\n\n",
        ranked.len()
    ));

    for (idx, prop) in ranked.iter().enumerate() {
        render_entry(&mut report, idx + 1, prop);
    }

    report.push_str(RULE);
    report.push('\n');
    render_stats(&mut report, all, ranked);

    report
}

/// 🆕 for 2020 and later, ✨ for the 2010s, 🏠 for anything older.
pub fn year_badge(year_built: u16) -> &'static str {
    if year_built >= 2020 {
        "🆕"
    } else if year_built >= 2010 {
        "✨"
    } else {
        "🏠"
    }
}

/// Ranked record with the largest value gap; the first one wins a tie.
pub fn best_value<'a>(ranked: &[&'a PropertyRecord]) -> Option<&'a PropertyRecord> {
    let mut best: Option<(&PropertyRecord, f64)> = None;

    for &prop in ranked {
        let Some(gap) = prop.value_gap else { continue };
        match best {
            Some((_, best_gap)) if gap <= best_gap => {}
            _ => best = Some((prop, gap)),
        }
    }

    best.map(|(prop, _)| prop)
}

fn render_entry(report: &mut String, position: usize, prop: &PropertyRecord) {
    report.push_str(&format!(
        "<b>{position}. {} Built {}</b>\n",
        year_badge(prop.year_built),
        prop.year_built
    ));
    report.push_str(&format!("📍 {}\n", escape_html(&prop.address)));
    report.push_str(&format!(
        "💰 {} | {}bd/{}ba | {} sqft\n",
        format_price(prop.price),
        prop.beds,
        prop.baths,
        group_thousands(prop.sqft)
    ));

    if let Some(estimate) = prop.estimated_value {
        let gap = prop.value_gap.map_or_else(|| "N/A".to_string(), format_gap);
        report.push_str(&format!("📊 Est: {} | Gap: {gap}\n", format_price(estimate)));
    }

    if let Some(distance) = prop.distance_miles {
        report.push_str(&format!("📏 {distance} mi from base\n"));
    }

    if let Some(url) = &prop.listing_url {
        report.push_str(&format!(
            "🔗 {}\n",
            escape_html(&truncate_with_ellipsis(url, URL_PREVIEW_CHARS))
        ));
    }

    if !prop.photos.is_empty() {
        report.push_str(&format!("📸 {} photos available\n", prop.photos.len()));
    }

    report.push('\n');
}

fn render_stats(report: &mut String, all: &[PropertyRecord], ranked: &[&PropertyRecord]) {
    report.push_str("<b>📊 QUICK STATS:</b>\n");

    let avg_price = rounded_mean(ranked.iter().map(|p| p.price));
    let avg_year = rounded_mean(ranked.iter().map(|p| u64::from(p.year_built)));

    match avg_price {
        Some(price) => report.push_str(&format!("• Avg Price: {}\n", format_price(price))),
        None => report.push_str("• Avg Price: N/A\n"),
    }
    match avg_year {
        Some(year) => report.push_str(&format!("• Avg Year Built: {year}\n")),
        None => report.push_str("• Avg Year Built: N/A\n"),
    }
    report.push_str(&format!("• Total Properties Tracked: {}\n", all.len()));

    if let Some(best) = best_value(ranked) {
        report.push_str(&format!("• 🔥 Best Value: {}\n", escape_html(best.street())));
        // best_value only returns records with a gap
        if let Some(gap) = best.value_gap {
            report.push_str(&format!("  ({} gap)\n", format_gap(gap)));
        }
    }
}

fn rounded_mean(values: impl Iterator<Item = u64>) -> Option<u64> {
    let (sum, count) = values.fold((0u128, 0u64), |(sum, count), v| {
        (sum + u128::from(v), count + 1)
    });
    if count == 0 {
        return None;
    }
    Some((sum as f64 / count as f64).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample_record;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn badge_tiers() {
        assert_eq!(year_badge(2024), "🆕");
        assert_eq!(year_badge(2020), "🆕");
        assert_eq!(year_badge(2019), "✨");
        assert_eq!(year_badge(2010), "✨");
        assert_eq!(year_badge(2009), "🏠");
    }

    #[test]
    fn title_block_has_profile_and_long_date() {
        let records = vec![sample_record(1, 2015)];
        let ranked: Vec<&PropertyRecord> = records.iter().collect();
        let report = render_report("Livingston Lake", &records, &ranked, today());

        assert!(report.starts_with("🏠 <b>DAILY REAL ESTATE REPORT</b>\n📍 Profile: Livingston Lake\n"));
        assert!(report.contains("📅 Sunday, October 18, 2026\n"));
        assert!(report.contains("<b>1. ✨ Built 2015</b>\n"));
        assert!(report.contains("💰 $250,000 | 3bd/2ba | 1,500 sqft\n"));
    }

    #[test]
    fn optional_lines_follow_their_fields() {
        let mut prop = sample_record(1, 2021);
        prop.estimated_value = Some(265_000);
        prop.distance_miles = Some(12.5);
        prop.listing_url = Some(format!("https://example.com/{}", "a".repeat(60)));
        prop.photos = vec!["p1".into(), "p2".into(), "p3".into()];

        let records = vec![prop];
        let ranked: Vec<&PropertyRecord> = records.iter().collect();
        let report = render_report("p", &records, &ranked, today());

        assert!(report.contains("📊 Est: $265,000 | Gap: N/A\n"));
        assert!(report.contains("📏 12.5 mi from base\n"));
        let expected_url = format!(
            "🔗 {}...\n",
            &format!("https://example.com/{}", "a".repeat(60))[..50]
        );
        assert!(report.contains(&expected_url));
        assert!(report.contains("📸 3 photos available\n"));
    }

    #[test]
    fn stats_use_ranked_subset_and_full_total() {
        let mut a = sample_record(1, 2020);
        a.price = 100_001;
        let mut b = sample_record(2, 2011);
        b.price = 200_000;
        let c = sample_record(3, 1950);

        let records = vec![a, b, c];
        let ranked: Vec<&PropertyRecord> = records.iter().take(2).collect();
        let report = render_report("p", &records, &ranked, today());

        // (100001 + 200000) / 2 = 150000.5 rounds up
        assert!(report.contains("• Avg Price: $150,001\n"));
        // (2020 + 2011) / 2 = 2015.5 rounds up
        assert!(report.contains("• Avg Year Built: 2016\n"));
        assert!(report.contains("• Total Properties Tracked: 3\n"));
    }

    #[test]
    fn best_value_prefers_largest_gap_and_first_on_tie() {
        let mut a = sample_record(1, 2020);
        a.value_gap = Some(-2.0);
        let mut b = sample_record(2, 2020);
        b.value_gap = Some(7.5);
        let mut c = sample_record(3, 2020);
        c.value_gap = Some(7.5);
        let d = sample_record(4, 2020);

        let records = vec![a, b, c, d];
        let ranked: Vec<&PropertyRecord> = records.iter().collect();

        assert_eq!(best_value(&ranked).map(|p| p.rank), Some(2));

        let report = render_report("p", &records, &ranked, today());
        assert!(report.contains("• 🔥 Best Value: 2 Main St\n  (+7.5% gap)\n"));
    }

    #[test]
    fn negative_gap_can_be_best_when_alone() {
        let mut a = sample_record(1, 2020);
        a.value_gap = Some(-4.0);
        let records = vec![a, sample_record(2, 2020)];
        let ranked: Vec<&PropertyRecord> = records.iter().collect();

        assert_eq!(best_value(&ranked).map(|p| p.rank), Some(1));
        let report = render_report("p", &records, &ranked, today());
        assert!(report.contains("  (-4% gap)\n"));
    }

    #[test]
    fn best_value_omitted_without_gaps() {
        let records = vec![sample_record(1, 2020)];
        let ranked: Vec<&PropertyRecord> = records.iter().collect();
        let report = render_report("p", &records, &ranked, today());

        assert!(!report.contains("Best Value"));
        assert!(report.ends_with("• Total Properties Tracked: 1\n"));
    }

    #[test]
    fn empty_ranking_prints_na_averages() {
        let report = render_report("p", &[], &[], today());
        assert!(report.contains("• Avg Price: N/A\n"));
        assert!(report.contains("• Avg Year Built: N/A\n"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut prop = sample_record(1, 2020);
        prop.address = "1 A&B <Lane>, Town".to_string();
        let records = vec![prop];
        let ranked: Vec<&PropertyRecord> = records.iter().collect();
        let report = render_report("R&D", &records, &ranked, today());

        assert!(report.contains("📍 Profile: R&amp;D\n"));
        assert!(report.contains("📍 1 A&amp;B &lt;Lane&gt;, Town\n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut prop = sample_record(1, 2012);
        prop.value_gap = Some(3.3);
        let records = vec![prop, sample_record(2, 2001)];
        let ranked: Vec<&PropertyRecord> = records.iter().collect();

        let first = render_report("p", &records, &ranked, today());
        let second = render_report("p", &records, &ranked, today());
        assert_eq!(first, second);
    }
}
