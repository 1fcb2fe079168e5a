use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Purchases,
    Savings,
    Businesses,
    Products,
    Deals,
    HowItWorks,
    Location,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseSummary {
    pub product_name: String,
    pub business_name: String,
    pub payments_completed: u32,
    pub total_payments: u32,
    pub status: PurchaseStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub price: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Business {
    pub name: String,
    pub category: String,
    pub rating: f32,
    pub location: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// What the assistant knows about the customer and the marketplace.
///
/// Purchases are expected newest first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssistantContext {
    pub purchases: Vec<PurchaseSummary>,
    pub savings: Decimal,
    pub total_spent: Decimal,
    pub businesses: Vec<Business>,
}

type Responder = fn(&str, &AssistantContext) -> String;

struct Rule {
    intent: Intent,
    keywords: &'static [&'static str],
    respond: Responder,
}

/// Evaluated top to bottom; the first rule with a matching keyword wins.
const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Purchases,
        keywords: &["purchase", "order", "ununuzi"],
        respond: purchases,
    },
    Rule {
        intent: Intent::Savings,
        keywords: &["saving", "akiba"],
        respond: savings,
    },
    Rule {
        intent: Intent::Businesses,
        keywords: &["business", "biashara", "store"],
        respond: businesses,
    },
    Rule {
        intent: Intent::Products,
        keywords: &["product", "price", "compare", "bidhaa"],
        respond: products,
    },
    Rule {
        intent: Intent::Deals,
        keywords: &["deal", "cheap", "offer", "ofa"],
        respond: deals,
    },
    Rule {
        intent: Intent::HowItWorks,
        keywords: &["installment", "awamu", "how", "work"],
        respond: how_it_works,
    },
    Rule {
        intent: Intent::Location,
        keywords: &["near", "location", "karibu"],
        respond: location,
    },
];

/// Rule-based shopping assistant.
pub struct Assistant;

impl Assistant {
    pub fn classify(message: &str) -> Intent {
        let message = message.to_lowercase();
        Self::rule_for(&message).map_or(Intent::Fallback, |rule| rule.intent)
    }

    pub fn respond(message: &str, context: &AssistantContext) -> String {
        let message = message.to_lowercase();
        match Self::rule_for(&message) {
            Some(rule) => (rule.respond)(&message, context),
            None => fallback(context),
        }
    }

    fn rule_for(message: &str) -> Option<&'static Rule> {
        RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| message.contains(k)))
    }
}

fn purchases(_: &str, ctx: &AssistantContext) -> String {
    let Some(latest) = ctx.purchases.first() else {
        return "You haven't made any purchases yet. Would you like me to show you available products and businesses?".to_string();
    };
    let count = |status: PurchaseStatus| ctx.purchases.iter().filter(|p| p.status == status).count();
    format!(
        "You have {} active purchases and {} completed ones. Your latest purchase is {} from {} with {}/{} payments completed.",
        count(PurchaseStatus::Active),
        count(PurchaseStatus::Completed),
        latest.product_name,
        latest.business_name,
        latest.payments_completed,
        latest.total_payments
    )
}

fn savings(_: &str, ctx: &AssistantContext) -> String {
    format!(
        "You've saved KSh {} so far through our installment system! You've spent a total of KSh {}. Would you like tips on how to save more?",
        group_thousands(ctx.savings),
        group_thousands(ctx.total_spent)
    )
}

fn businesses(_: &str, ctx: &AssistantContext) -> String {
    let mut categories: Vec<&str> = Vec::new();
    for business in &ctx.businesses {
        if !categories.contains(&business.category.as_str()) {
            categories.push(&business.category);
        }
    }
    let listing: Vec<String> = ctx
        .businesses
        .iter()
        .map(|b| format!("{} ({}, Rating: {})", b.name, b.category, b.rating))
        .collect();
    format!(
        "I found {} businesses: {}. Available categories: {}. Which type interests you?",
        ctx.businesses.len(),
        listing.join(", "),
        categories.join(", ")
    )
}

struct Listing<'a> {
    product: &'a Product,
    business: &'a Business,
}

fn listings(ctx: &AssistantContext) -> Vec<Listing<'_>> {
    ctx.businesses
        .iter()
        .flat_map(|business| {
            business
                .products
                .iter()
                .map(move |product| Listing { product, business })
        })
        .collect()
}

fn in_category<'l, 'a>(all: &'l [Listing<'a>], needle: &str) -> Vec<&'l Listing<'a>> {
    all.iter()
        .filter(|l| l.product.category.to_lowercase().contains(needle))
        .collect()
}

fn describe_at(listed: &[&Listing<'_>]) -> String {
    listed
        .iter()
        .map(|l| {
            format!(
                "{}: KSh {} at {}",
                l.product.name,
                group_thousands(l.product.price.into()),
                l.business.name
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn products(message: &str, ctx: &AssistantContext) -> String {
    let mut all = listings(ctx);

    if ["phone", "smartphone", "simu"].iter().any(|k| message.contains(k)) {
        let phones = in_category(&all, "smartphone");
        if let Some(cheapest) = phones.iter().map(|l| l.product.price).min() {
            return format!(
                "Available smartphones: {}. The cheapest is KSh {}.",
                describe_at(&phones),
                group_thousands(cheapest.into())
            );
        }
    }

    if ["laptop", "computer"].iter().any(|k| message.contains(k)) {
        let laptops = in_category(&all, "laptop");
        if !laptops.is_empty() {
            return format!(
                "Available laptops: {}. All support installment payments!",
                describe_at(&laptops)
            );
        }
    }

    all.sort_by(|a, b| b.business.rating.total_cmp(&a.business.rating));
    let top: Vec<String> = all
        .iter()
        .take(3)
        .map(|l| format!("{}: KSh {}", l.product.name, group_thousands(l.product.price.into())))
        .collect();
    format!(
        "Top-rated products: {}. All available with flexible payment plans. Which interests you?",
        top.join(", ")
    )
}

fn deals(_: &str, ctx: &AssistantContext) -> String {
    let mut all = listings(ctx);
    all.sort_by_key(|l| l.product.price);
    let cheapest: Vec<String> = all
        .iter()
        .take(3)
        .map(|l| {
            format!(
                "{} at {}: KSh {}",
                l.product.name,
                l.business.name,
                group_thousands(l.product.price.into())
            )
        })
        .collect();
    format!(
        "Best deals right now: {}. All can be paid in installments starting from as low as 25% down payment!",
        cheapest.join(", ")
    )
}

fn how_it_works(_: &str, _: &AssistantContext) -> String {
    "With InstallmentPay, you pay 25-50% upfront and the rest in 2-6 monthly installments. \
     While paying, you also build savings! No interest charges, just a small service fee. \
     You get the product immediately and build financial discipline."
        .to_string()
}

fn location(_: &str, ctx: &AssistantContext) -> String {
    let located = |city: &str| {
        ctx.businesses
            .iter()
            .filter(|b| b.location.contains(city))
            .map(|b| b.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "In Nairobi: {}. In Mombasa: {}. Which location are you interested in?",
        located("Nairobi"),
        located("Mombasa")
    )
}

fn fallback(ctx: &AssistantContext) -> String {
    let products: usize = ctx.businesses.iter().map(|b| b.products.len()).sum();
    format!(
        "I understand you're looking for help! I have access to {} businesses with {} products. \
         I can help you find the best deals, compare prices, track your purchases, or explain our \
         installment system. What specific information do you need?",
        ctx.businesses.len(),
        products
    )
}

/// Formats a whole-unit amount with comma thousands separators.
fn group_thousands(value: Decimal) -> String {
    let whole = value.trunc().abs().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value.is_sign_negative() && !value.trunc().is_zero() {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn context() -> AssistantContext {
        AssistantContext {
            purchases: vec![
                PurchaseSummary {
                    product_name: "Samsung Galaxy A54".to_string(),
                    business_name: "TechHub Kenya".to_string(),
                    payments_completed: 2,
                    total_payments: 4,
                    status: PurchaseStatus::Active,
                },
                PurchaseSummary {
                    product_name: "Sofa Set".to_string(),
                    business_name: "Furniture Palace".to_string(),
                    payments_completed: 3,
                    total_payments: 3,
                    status: PurchaseStatus::Completed,
                },
            ],
            savings: dec!(12500),
            total_spent: dec!(85000),
            businesses: vec![
                Business {
                    name: "TechHub Kenya".to_string(),
                    category: "Electronics".to_string(),
                    rating: 4.8,
                    location: "Nairobi CBD".to_string(),
                    products: vec![
                        Product {
                            name: "Samsung Galaxy A54".to_string(),
                            category: "Smartphones".to_string(),
                            price: 45_000,
                        },
                        Product {
                            name: "HP Pavilion".to_string(),
                            category: "Laptops".to_string(),
                            price: 75_000,
                        },
                    ],
                },
                Business {
                    name: "Coast Mobile".to_string(),
                    category: "Electronics".to_string(),
                    rating: 4.2,
                    location: "Mombasa".to_string(),
                    products: vec![Product {
                        name: "Tecno Spark 10".to_string(),
                        category: "Smartphones".to_string(),
                        price: 15_000,
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_keyword_precedence() {
        assert_eq!(Assistant::classify("Where is my ORDER?"), Intent::Purchases);
        // "purchase" outranks "savings"
        assert_eq!(Assistant::classify("savings from my purchase"), Intent::Purchases);
        assert_eq!(Assistant::classify("akiba yangu"), Intent::Savings);
        assert_eq!(Assistant::classify("which store has the best price"), Intent::Businesses);
        assert_eq!(Assistant::classify("compare prices"), Intent::Products);
        assert_eq!(Assistant::classify("any cheap offer?"), Intent::Deals);
        assert_eq!(Assistant::classify("how does awamu work"), Intent::HowItWorks);
        assert_eq!(Assistant::classify("anything near me"), Intent::Location);
        assert_eq!(Assistant::classify("hello"), Intent::Fallback);
    }

    #[test]
    fn test_purchase_summary() {
        let reply = Assistant::respond("my purchases", &context());
        assert!(reply.contains("1 active purchases and 1 completed"));
        assert!(reply.contains("Samsung Galaxy A54 from TechHub Kenya with 2/4"));

        let empty = Assistant::respond("my purchases", &AssistantContext::default());
        assert!(empty.starts_with("You haven't made any purchases yet"));
    }

    #[test]
    fn test_savings_are_grouped() {
        let reply = Assistant::respond("savings", &context());
        assert!(reply.contains("KSh 12,500"));
        assert!(reply.contains("KSh 85,000"));
    }

    #[test]
    fn test_phone_products_report_cheapest() {
        let reply = Assistant::respond("phone prices", &context());
        assert!(reply.starts_with("Available smartphones:"));
        assert!(reply.contains("Tecno Spark 10: KSh 15,000 at Coast Mobile"));
        assert!(reply.ends_with("The cheapest is KSh 15,000."));
    }

    #[test]
    fn test_deals_are_cheapest_first() {
        let reply = Assistant::respond("deals", &context());
        assert!(reply.starts_with("Best deals right now: Tecno Spark 10 at Coast Mobile: KSh 15,000"));
    }

    #[test]
    fn test_location_splits_cities() {
        let reply = Assistant::respond("near me", &context());
        assert!(reply.starts_with("In Nairobi: TechHub Kenya. In Mombasa: Coast Mobile."));
    }

    #[test]
    fn test_fallback_counts_catalog() {
        let reply = Assistant::respond("habari", &context());
        assert!(reply.contains("2 businesses with 3 products"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(dec!(0)), "0");
        assert_eq!(group_thousands(dec!(999)), "999");
        assert_eq!(group_thousands(dec!(1000)), "1,000");
        assert_eq!(group_thousands(dec!(1234567.89)), "1,234,567");
    }
}
