//! Render a plan and its progress as a line-oriented checklist document.
//!
//! This is the contract the export collaborators (text download, paginated
//! document) consume: one `- [x]`/`- [ ]` line per item, grouped under the
//! seven section headings, trailed by the budget table. Writing the result
//! anywhere is the caller's job.

use chrono::NaiveDate;

use crate::office::Office;
use crate::plan::{CampaignPlan, Section};
use crate::progress::PlanProgress;

use super::template::deadline_text;

/// Render the checklist document.
///
/// `today` comes from the caller so the "days remaining" figure (and the
/// verification footer) are reproducible; hosts pass the current date.
pub fn render_markdown(
    office: &Office,
    plan: &CampaignPlan,
    progress: &PlanProgress,
    today: NaiveDate,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("# YOUR CAMPAIGN PLAN: {}\n\n", office.title));
    out.push_str(&format!(
        "**{} - District {}**\n\n",
        office.state, office.district
    ));

    // Deadline line: long date plus a day count when the wire text parses,
    // the raw text alone when it does not, omitted entirely when absent.
    if office.filing_deadline.is_some() {
        out.push_str(&format!("**Filing Deadline:** {}", deadline_text(office)));
        if let Some(days) = days_until_deadline(office, today) {
            out.push_str(&format!(" - **{days} days remaining**"));
        }
        out.push_str("\n\n");
    }

    if let Some(cost) = &office.estimated_cost {
        out.push_str(&format!("**Estimated Budget:** {cost}\n\n"));
    }

    out.push_str("---\n\n");

    for section in Section::ALL {
        let items = plan.section(section);
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("## {}\n\n", section.heading()));
        for item in items {
            let checked = if progress.is_done(&item.id) { 'x' } else { ' ' };
            out.push_str(&format!("- [{checked}] {}\n", item.task));
        }
        out.push('\n');
    }

    if let Some(budget) = &plan.budget {
        out.push_str("## BUDGET BREAKDOWN\n\n");
        for (category, percentage) in budget {
            out.push_str(&format!("- **{category}:** {percentage}\n"));
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
    out.push_str("*Generated by Decide to Run - https://www.decidetorun.com*\n");
    out.push_str(&format!(
        "*Data sourced from FEC and verified {}*\n",
        today.format("%-m/%-d/%Y")
    ));

    out
}

/// Days from `today` to the filing deadline, when the deadline parses.
/// Negative once the deadline has passed.
pub fn days_until_deadline(office: &Office, today: NaiveDate) -> Option<i64> {
    let deadline = office
        .filing_deadline
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())?;
    Some((deadline - today).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::office::{Level, OfficeType};
    use crate::plan::build_plan;

    fn office() -> Office {
        Office {
            title: "U.S. House - CA District 12".to_owned(),
            state: "CA".to_owned(),
            district: "12".to_owned(),
            office_type: Some(OfficeType::House),
            level: Some(Level::Federal),
            filing_deadline: Some("2026-06-01".to_owned()),
            estimated_cost: Some("$800,000 - $2,500,000".to_owned()),
            min_age: Some(25),
            ..Office::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 2).unwrap()
    }

    #[test]
    fn header_and_deadline_line() {
        let o = office();
        let doc = render_markdown(&o, &build_plan(&o), &PlanProgress::default(), today());
        assert!(doc.starts_with("# YOUR CAMPAIGN PLAN: U.S. House - CA District 12\n"));
        assert!(doc.contains("**CA - District 12**"));
        assert!(doc.contains("**Filing Deadline:** June 1, 2026 - **30 days remaining**"));
        assert!(doc.contains("**Estimated Budget:** $800,000 - $2,500,000"));
    }

    #[test]
    fn one_line_per_item_with_markers() {
        let o = office();
        let plan = build_plan(&o);
        let progress = PlanProgress::default().toggle("research");
        let doc = render_markdown(&o, &plan, &progress, today());

        assert!(doc.contains("- [x] Research filing requirements for CA\n"));
        assert!(doc.contains("- [ ] Set up campaign bank account\n"));
        let item_lines = doc.lines().filter(|l| l.starts_with("- [")).count();
        assert_eq!(item_lines, plan.len());
    }

    #[test]
    fn sections_appear_in_display_order() {
        let o = office();
        let doc = render_markdown(&o, &build_plan(&o), &PlanProgress::default(), today());
        let pre = doc.find("## PRE-FILING ESSENTIALS (Do This First)").unwrap();
        let filing = doc.find("## FILING REQUIREMENTS").unwrap();
        let messaging = doc.find("## MESSAGING & COMMUNICATIONS").unwrap();
        let budget = doc.find("## BUDGET BREAKDOWN").unwrap();
        assert!(pre < filing && filing < messaging && messaging < budget);
        assert!(doc.contains("- **Media & Advertising:** 35-45%"));
    }

    #[test]
    fn fallback_plan_skips_empty_sections_and_budget() {
        let o = Office::default();
        let doc = render_markdown(&o, &build_plan(&o), &PlanProgress::default(), today());
        assert!(!doc.contains("## FUNDRAISING CHECKLIST"));
        assert!(!doc.contains("## TEAM TO BUILD"));
        assert!(!doc.contains("## FIELD WORK & OUTREACH"));
        assert!(!doc.contains("## BUDGET BREAKDOWN"));
        // No deadline on record: the deadline line is omitted.
        assert!(!doc.contains("**Filing Deadline:**"));
    }

    #[test]
    fn malformed_deadline_renders_without_day_count() {
        let o = Office {
            filing_deadline: Some("TBD".to_owned()),
            ..Office::default()
        };
        let doc = render_markdown(&o, &build_plan(&o), &PlanProgress::default(), today());
        assert!(doc.contains("**Filing Deadline:** TBD\n"));
        assert!(!doc.contains("days remaining"));
    }

    #[test]
    fn footer_carries_verification_date() {
        let o = office();
        let doc = render_markdown(&o, &build_plan(&o), &PlanProgress::default(), today());
        assert!(doc.ends_with("*Data sourced from FEC and verified 5/2/2026*\n"));
    }
}
