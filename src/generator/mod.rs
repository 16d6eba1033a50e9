//! Rule-based campaign generation.
//!
//! The generator is the business-rule collaborator behind the push channel:
//! a pure function of the connected sources, the requested campaign type, the
//! selected channels and the clock. It never touches the session store, so
//! the streaming layer can be tested against a deterministic fake.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Map, Value};

use crate::catalog;

/// Produces the campaign document streamed to the client.
///
/// Implementations must be pure and fast: the generate endpoint calls this
/// synchronously before the push channel opens, and the call is not
/// cancellable once started.
pub trait CampaignGenerator: Send + Sync {
    fn generate(&self, source_ids: &[&str], campaign_type: &str, channel_ids: &[&str]) -> Value;
}

/// The shipped generator: static marketing rules keyed on campaign type,
/// connected sources and selected channels.
pub struct RuleBasedGenerator;

impl CampaignGenerator for RuleBasedGenerator {
    fn generate(&self, source_ids: &[&str], campaign_type: &str, channel_ids: &[&str]) -> Value {
        build_campaign(source_ids, campaign_type, channel_ids, Utc::now())
    }
}

fn default_channel(campaign_type: &str) -> &'static str {
    match campaign_type {
        "flash-sale" => "sms",
        "product-launch" => "email",
        "re-engagement" => "email",
        "seasonal" => "social",
        _ => "email",
    }
}

fn campaign_copy(campaign_type: &str) -> (&'static str, &'static str, &'static str, &'static str) {
    // (title, objective, headline, call to action)
    match campaign_type {
        "flash-sale" => (
            "48-Hour Flash Sale",
            "Drive a short burst of revenue from warm customers",
            "24 Hours Left: Up to 40% Off Best Sellers",
            "Shop the Sale",
        ),
        "product-launch" => (
            "New Arrival Launch",
            "Introduce the newest product to engaged customers first",
            "It's Here: Meet Our Newest Arrival",
            "Be the First to Shop",
        ),
        "re-engagement" => (
            "Win-Back Campaign",
            "Bring lapsed customers back with a personal incentive",
            "We Miss You - Here's 15% Off Your Next Order",
            "Claim Your Offer",
        ),
        "seasonal" => (
            "Seasonal Spotlight",
            "Ride seasonal demand with curated picks",
            "Fresh Picks for the Season",
            "Explore the Collection",
        ),
        _ => (
            "Customer Appreciation Campaign",
            "Strengthen the relationship with your most engaged customers",
            "A Little Something, Just for You",
            "See What's New",
        ),
    }
}

fn message_body(campaign_type: &str, primary_channel: &str) -> String {
    let urgency = match campaign_type {
        "flash-sale" => "The clock is ticking - prices go back up in 48 hours.",
        "re-engagement" => "Your offer is waiting, and it won't last forever.",
        _ => "Curated for you, based on what you already love.",
    };
    let medium = match primary_channel {
        "sms" => "Short link inside, no app required.",
        "push" => "Tap to open your personalized picks.",
        _ => "Everything you need is one click away.",
    };
    format!("{urgency} {medium}")
}

fn audience_criteria(source_ids: &[&str]) -> Vec<&'static str> {
    let mut criteria = Vec::new();
    for id in source_ids {
        let criterion = match *id {
            "shopify" => "Purchased in the last 90 days",
            "google-analytics" => "Visited 3+ pages in the last 30 days",
            "meta-ads" => "Engaged with a paid ad in the last 14 days",
            "klaviyo" => "Opened an email in the last 30 days",
            "stripe" => "Has an active subscription or repeat payment",
            _ => continue,
        };
        if !criteria.contains(&criterion) {
            criteria.push(criterion);
        }
    }
    criteria
}

/// Pure document assembly, split out so tests can pin the clock.
pub fn build_campaign(
    source_ids: &[&str],
    campaign_type: &str,
    channel_ids: &[&str],
    now: DateTime<Utc>,
) -> Value {
    let primary = channel_ids
        .first()
        .copied()
        .unwrap_or_else(|| default_channel(campaign_type));
    let secondary: Vec<&str> = channel_ids.iter().skip(1).copied().collect();

    let (title, objective, headline, call_to_action) = campaign_copy(campaign_type);

    let source_names: Vec<&str> = source_ids
        .iter()
        .filter_map(|id| catalog::find_source(id))
        .map(|s| s.name)
        .collect();

    let (start_offset_days, duration_days, send_time) = match campaign_type {
        "flash-sale" => (1, 2, "10:00"),
        "re-engagement" => (2, 10, "18:30"),
        _ => (3, 14, "09:00"),
    };
    let start = now.date_naive() + Duration::days(start_offset_days);
    let end = start + Duration::days(duration_days);

    let channel_count = 1 + secondary.len();
    let recommended_budget = 500 + 250 * channel_count as u64;
    let mut breakdown = Map::new();
    let primary_share = if secondary.is_empty() {
        recommended_budget
    } else {
        recommended_budget * 6 / 10
    };
    breakdown.insert(primary.to_string(), json!(primary_share));
    if !secondary.is_empty() {
        let per_secondary = (recommended_budget - primary_share) / secondary.len() as u64;
        for channel in &secondary {
            breakdown.insert(channel.to_string(), json!(per_secondary));
        }
    }

    let estimated_reach = 4200 + 1800 * source_ids.len() as u64;

    json!({
        "campaign": {
            "type": campaign_type,
            "title": title,
            "objective": objective,
            "dataSources": source_names,
            "generatedAt": now.to_rfc3339(),
        },
        "channel": {
            "primary": primary,
            "secondary": secondary,
            "rationale": channel_rationale(primary, campaign_type),
        },
        "timing": {
            "startDate": start.format("%Y-%m-%d").to_string(),
            "endDate": end.format("%Y-%m-%d").to_string(),
            "sendTime": send_time,
            "rationale": timing_rationale(campaign_type),
        },
        "message": {
            "headline": headline,
            "body": message_body(campaign_type, primary),
            "callToAction": call_to_action,
        },
        "audience": {
            "segment": audience_segment(source_ids),
            "estimatedReach": estimated_reach,
            "criteria": audience_criteria(source_ids),
        },
        "budget": {
            "recommended": recommended_budget,
            "currency": "USD",
            "breakdown": breakdown,
        },
    })
}

fn channel_rationale(primary: &str, campaign_type: &str) -> String {
    let channel_name = catalog::find_channel(primary).map_or(primary, |c| c.name);
    match campaign_type {
        "flash-sale" => format!(
            "{channel_name} reaches customers within minutes, which matters for a time-boxed offer"
        ),
        "re-engagement" => format!(
            "{channel_name} performs best with audiences that have gone quiet on other channels"
        ),
        _ => format!("{channel_name} has the strongest engagement for this audience"),
    }
}

fn timing_rationale(campaign_type: &str) -> &'static str {
    match campaign_type {
        "flash-sale" => "A short window starting tomorrow keeps the urgency credible",
        "re-engagement" => "Evening sends perform better with lapsed customers",
        _ => "A two-week run with a weekday morning send maximizes opens",
    }
}

fn audience_segment(source_ids: &[&str]) -> &'static str {
    if source_ids.contains(&"shopify") {
        "Repeat purchasers, last 90 days"
    } else if source_ids.contains(&"klaviyo") {
        "Engaged subscribers, last 30 days"
    } else {
        "High-intent visitors"
    }
}
