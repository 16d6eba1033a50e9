use serde_json::{json, Value};

/// A data source the demo client can connect to a session.
///
/// The catalog is the single source of truth for source validation: a
/// session's connected set is always a subset of these ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSource {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// A delivery channel a campaign can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const DATA_SOURCES: &[DataSource] = &[
    DataSource {
        id: "shopify",
        name: "Shopify Store",
        description: "Orders, products and customer history from your storefront",
    },
    DataSource {
        id: "google-analytics",
        name: "Google Analytics",
        description: "Traffic, conversion and on-site behavior metrics",
    },
    DataSource {
        id: "meta-ads",
        name: "Meta Ads Manager",
        description: "Paid social performance across Facebook and Instagram",
    },
    DataSource {
        id: "klaviyo",
        name: "Klaviyo",
        description: "Email and SMS engagement history",
    },
    DataSource {
        id: "stripe",
        name: "Stripe",
        description: "Payment volume and subscription revenue",
    },
];

pub const CHANNELS: &[Channel] = &[
    Channel {
        id: "email",
        name: "Email",
        description: "Newsletter and lifecycle email campaigns",
    },
    Channel {
        id: "sms",
        name: "SMS",
        description: "Short, time-sensitive text messages",
    },
    Channel {
        id: "push",
        name: "Push Notification",
        description: "Mobile and web push notifications",
    },
    Channel {
        id: "social",
        name: "Organic Social",
        description: "Posts on your brand's social accounts",
    },
    Channel {
        id: "display",
        name: "Display Ads",
        description: "Banner placements across the display network",
    },
];

pub fn find_source(id: &str) -> Option<&'static DataSource> {
    DATA_SOURCES.iter().find(|s| s.id == id)
}

pub fn find_channel(id: &str) -> Option<&'static Channel> {
    CHANNELS.iter().find(|c| c.id == id)
}

/// Canned payload returned on connect, standing in for a real integration.
pub fn mock_payload(source_id: &str) -> Value {
    match source_id {
        "shopify" => json!({
            "ordersLast30Days": 412,
            "averageOrderValue": 58.40,
            "topProduct": "Linen Throw Blanket",
            "repeatCustomerRate": 0.31,
        }),
        "google-analytics" => json!({
            "sessionsLast30Days": 18250,
            "conversionRate": 0.023,
            "topLandingPage": "/collections/new-arrivals",
            "bounceRate": 0.44,
        }),
        "meta-ads" => json!({
            "activeCampaigns": 3,
            "spendLast30Days": 1240.00,
            "averageCpc": 0.87,
            "bestAudience": "Lookalike 1% - Purchasers",
        }),
        "klaviyo" => json!({
            "listSize": 9340,
            "averageOpenRate": 0.38,
            "averageClickRate": 0.041,
            "lastCampaign": "Spring Preview",
        }),
        "stripe" => json!({
            "revenueLast30Days": 24080.00,
            "activeSubscriptions": 183,
            "failedPaymentRate": 0.012,
            "currency": "USD",
        }),
        _ => json!({}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_source_has_a_mock_payload() {
        for source in DATA_SOURCES {
            let payload = mock_payload(source.id);
            assert!(
                payload.as_object().is_some_and(|o| !o.is_empty()),
                "source {} has an empty mock payload",
                source.id
            );
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(find_source("shopify").map(|s| s.name), Some("Shopify Store"));
        assert!(find_source("unknown-x").is_none());
        assert_eq!(find_channel("sms").map(|c| c.name), Some("SMS"));
        assert!(find_channel("fax").is_none());
    }

    #[test]
    fn ids_are_unique() {
        for (i, a) in DATA_SOURCES.iter().enumerate() {
            for b in &DATA_SOURCES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
        for (i, a) in CHANNELS.iter().enumerate() {
            for b in &CHANNELS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
