//! Checklist templates: the base plan every race gets, plus the fixed
//! per-category content.
//!
//! All task text is carried over verbatim from the production templates.
//! The only computation here is string interpolation of office fields; the
//! category tables are static lookup data.

use chrono::NaiveDate;

use crate::office::Office;
use crate::plan::{CampaignPlan, ChecklistItem, Priority, RaceCategory};

use Priority::{Critical, High, Medium};

/// Build the campaign plan for an office.
///
/// Pure and total: classification ambiguity resolves to the fallback
/// category, and missing or malformed office fields interpolate as empty or
/// pass-through text. Never fails, never caches.
pub fn build_plan(office: &Office) -> CampaignPlan {
    let mut plan = base_plan(office);

    match RaceCategory::classify(office) {
        RaceCategory::FederalHouse => extend_federal_house(&mut plan, office),
        RaceCategory::StateLegislature => extend_state_legislature(&mut plan, office),
        RaceCategory::Local => extend_local(&mut plan, office),
        RaceCategory::Fallback => {}
    }

    plan
}

/// The base template shared by every category: pre-filing essentials,
/// core filing steps, first-30-days actions, and messaging work.
fn base_plan(office: &Office) -> CampaignPlan {
    let age = office
        .min_age
        .map(|a| a.to_string())
        .unwrap_or_default();

    CampaignPlan {
        pre_filing_essentials: vec![
            ChecklistItem::new(
                "research",
                format!("Research filing requirements for {}", office.state),
                Critical,
            ),
            ChecklistItem::new(
                "eligibility",
                format!("Verify eligibility (Age: {age}+, Citizenship, Residency)"),
                Critical,
            ),
            ChecklistItem::new("bank", "Set up campaign bank account", Critical),
            ChecklistItem::new(
                "deadline",
                format!("Mark filing deadline: {}", deadline_text(office)),
                Critical,
            ),
        ],
        filing: vec![
            ChecklistItem::new("org", "File Statement of Organization", Critical),
            ChecklistItem::new("treasurer", "Designate campaign treasurer", Critical),
            ChecklistItem::new("candidacy", "File Declaration of Candidacy", Critical),
        ],
        first_30_days: vec![
            ChecklistItem::new("committee", "Form exploratory committee", High),
            ChecklistItem::new("website", "Launch campaign website", High),
            ChecklistItem::new(
                "social",
                "Create social media accounts (Facebook, Twitter/X, Instagram)",
                High,
            ),
            ChecklistItem::new(
                "coffee",
                "Schedule 15-20 coffee meetings with community leaders",
                Medium,
            ),
        ],
        fundraising: vec![],
        team: vec![],
        field_work: vec![],
        messaging: vec![
            ChecklistItem::new("bio", "Write candidate biography", High),
            ChecklistItem::new("issues", "Identify 3-5 core issues", High),
            ChecklistItem::new("talking", "Develop talking points", Medium),
        ],
        budget: None,
    }
}

fn extend_federal_house(plan: &mut CampaignPlan, office: &Office) {
    plan.filing.extend([
        ChecklistItem::new(
            "fec",
            "Register with Federal Election Commission (FEC)",
            Critical,
        ),
        ChecklistItem::new("fecid", "Obtain FEC ID number", Critical),
    ]);
    plan.fundraising = vec![
        ChecklistItem::new(
            "target",
            format!("Set fundraising target: {}", cost_text(office)),
            Critical,
        ),
        ChecklistItem::new("actblue", "Set up ActBlue/WinRed account", Critical),
        ChecklistItem::new("calltime", "Schedule daily call time (3-5 hours)", Critical),
        ChecklistItem::new(
            "personal",
            "Personal network asks (Goal: $25,000 in first 30 days)",
            High,
        ),
        ChecklistItem::new("events", "Plan quarterly fundraising events", High),
        ChecklistItem::new(
            "pacs",
            "Research endorsement opportunities from PACs",
            Medium,
        ),
        ChecklistItem::new(
            "bundlers",
            "Recruit 10 bundlers (people who can raise $5K+ each)",
            Medium,
        ),
        ChecklistItem::new("recurring", "Set up recurring donor program", Medium),
    ];
    plan.team = vec![
        ChecklistItem::new(
            "manager",
            "Hire Campaign Manager ($5,000-8,000/month)",
            Critical,
        ),
        ChecklistItem::new(
            "finance",
            "Hire Finance Director ($4,000-6,000/month)",
            Critical,
        ),
        ChecklistItem::new(
            "comms",
            "Hire Communications Director ($4,000-6,000/month)",
            High,
        ),
        ChecklistItem::new("field", "Hire Field Director ($3,500-5,000/month)", High),
        ChecklistItem::new(
            "digital",
            "Hire Digital Director ($3,000-5,000/month)",
            Medium,
        ),
        ChecklistItem::new("volunteers", "Recruit Volunteer Coordinator", Medium),
    ];
    plan.field_work = vec![
        ChecklistItem::new("data", "Purchase voter file/VAN access", Critical),
        ChecklistItem::new("offices", "Secure campaign office space", High),
        ChecklistItem::new("canvass", "Plan door-to-door canvassing schedule", High),
        ChecklistItem::new("phones", "Set up phone banking operation", High),
        ChecklistItem::new(
            "events",
            "Plan community meet-and-greets (2-3 per week)",
            Medium,
        ),
    ];
    plan.budget = Some(budget(&[
        ("Staff & Operations", "25-30%"),
        ("Media & Advertising", "35-45%"),
        ("Field Operations", "15-20%"),
        ("Fundraising Costs", "8-12%"),
        ("Other", "5-10%"),
    ]));
}

fn extend_state_legislature(plan: &mut CampaignPlan, office: &Office) {
    plan.filing.extend([
        ChecklistItem::new(
            "state",
            format!("Register with {} State Board of Elections", office.state),
            Critical,
        ),
        ChecklistItem::new(
            "signatures",
            "Collect petition signatures (typically 100-500)",
            Critical,
        ),
    ]);
    plan.fundraising = vec![
        ChecklistItem::new(
            "target",
            format!("Set fundraising target: {}", cost_text(office)),
            Critical,
        ),
        ChecklistItem::new(
            "limits",
            format!("Research {} contribution limits", office.state),
            Critical,
        ),
        ChecklistItem::new("actblue", "Set up ActBlue/WinRed account", High),
        ChecklistItem::new("calltime", "Schedule 2-3 hours daily call time", High),
        ChecklistItem::new(
            "personal",
            "Personal network asks (Goal: $10,000 in first 30 days)",
            High,
        ),
        ChecklistItem::new(
            "local",
            "Approach local business owners and community leaders",
            High,
        ),
        ChecklistItem::new("events", "Plan 3-4 fundraising house parties", Medium),
        ChecklistItem::new(
            "endorsements",
            "Seek union and interest group endorsements",
            Medium,
        ),
    ];
    plan.team = vec![
        ChecklistItem::new(
            "manager",
            "Hire Campaign Manager or Consultant ($3,000-5,000/month)",
            Critical,
        ),
        ChecklistItem::new("finance", "Hire Finance Director or Volunteer", High),
        ChecklistItem::new("field", "Recruit Field Organizer", High),
        ChecklistItem::new("volunteers", "Build volunteer team (20-50 people)", High),
        ChecklistItem::new(
            "comms",
            "Hire Communications person or consultant",
            Medium,
        ),
    ];
    plan.field_work = vec![
        ChecklistItem::new("data", "Get access to state voter file", High),
        ChecklistItem::new("canvass", "Plan neighborhood canvassing (weekends)", High),
        ChecklistItem::new("lit", "Design and print palm cards/literature", High),
        ChecklistItem::new(
            "endorsements",
            "Seek endorsements from local elected officials",
            High,
        ),
        ChecklistItem::new("forums", "Attend community forums and debates", Medium),
    ];
    plan.budget = Some(budget(&[
        ("Staff & Consultants", "20-25%"),
        ("Media & Advertising", "30-40%"),
        ("Field Operations", "20-25%"),
        ("Fundraising Costs", "10-15%"),
        ("Other", "5-10%"),
    ]));
}

fn extend_local(plan: &mut CampaignPlan, office: &Office) {
    plan.filing.extend([
        ChecklistItem::new("local", "Register with City/County Clerk", Critical),
        ChecklistItem::new(
            "signatures",
            "Collect petition signatures (typically 25-200)",
            Critical,
        ),
    ]);
    plan.fundraising = vec![
        ChecklistItem::new(
            "target",
            format!("Set fundraising target: {}", cost_text(office)),
            Critical,
        ),
        ChecklistItem::new("limits", "Research local contribution limits", High),
        ChecklistItem::new(
            "personal",
            "Personal network asks (Goal: $2,000-5,000)",
            High,
        ),
        ChecklistItem::new("events", "Plan 2-3 small fundraising house parties", High),
        ChecklistItem::new("local", "Approach local business owners", Medium),
        ChecklistItem::new("online", "Set up online donation page", Medium),
    ];
    plan.team = vec![
        ChecklistItem::new(
            "treasurer",
            "Recruit Campaign Treasurer (volunteer)",
            Critical,
        ),
        ChecklistItem::new(
            "manager",
            "Campaign Manager (can be volunteer or part-time)",
            High,
        ),
        ChecklistItem::new("volunteers", "Build volunteer team (10-25 people)", High),
        ChecklistItem::new(
            "social",
            "Recruit Social Media Manager (volunteer)",
            Medium,
        ),
    ];
    plan.field_work = vec![
        ChecklistItem::new(
            "doors",
            "Plan door-to-door canvassing (every weekend)",
            Critical,
        ),
        ChecklistItem::new("lit", "Design and print palm cards", High),
        ChecklistItem::new("yards", "Order yard signs", High),
        ChecklistItem::new(
            "neighborhood",
            "Attend neighborhood association meetings",
            High,
        ),
        ChecklistItem::new("coffee", "Host \"Coffee with Candidate\" events", High),
        ChecklistItem::new(
            "endorsements",
            "Seek endorsements from community leaders",
            Medium,
        ),
        ChecklistItem::new(
            "newspaper",
            "Meet with local newspaper editorial board",
            Medium,
        ),
    ];
    plan.budget = Some(budget(&[
        ("Literature & Signs", "30-35%"),
        ("Digital Advertising", "20-25%"),
        ("Field Operations", "20-25%"),
        ("Fundraising Events", "10-15%"),
        ("Other", "10-15%"),
    ]));
}

fn budget(rows: &[(&str, &str)]) -> Vec<(String, String)> {
    rows.iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

/// The filing deadline as display text: long en-US format when the wire
/// text parses as an ISO date ("June 1, 2026"), the raw text verbatim when
/// it does not, empty when absent.
pub(crate) fn deadline_text(office: &Office) -> String {
    match office.filing_deadline.as_deref() {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => format_long_date(date),
            Err(_) => raw.to_owned(),
        },
        None => String::new(),
    }
}

/// Long en-US date: "June 1, 2026".
fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn cost_text(office: &Office) -> String {
    office.estimated_cost.clone().unwrap_or_default()
}
