//! Prompt construction per insight type. Pure functions: no I/O, no
//! randomness, no timestamps — the same inputs always yield the same
//! prompt string.

use serde::{Deserialize, Serialize};

use product_store::{InsightType, Product};

/// Analyst preamble shared by every single-product template.
const ANALYST_PREAMBLE: &str = "You are an expert market analyst specializing in e-commerce and \
marketplace insights. Your role is to provide actionable, data-driven insights about products in \
online marketplaces. Be concise, specific, and focus on actionable recommendations.";

/// Preamble for the product-comparison template.
const COMPARISON_PREAMBLE: &str = "You are an expert product comparison analyst. Provide \
detailed, objective comparisons between products.";

/// Normalized read-only projection of a product, as fed to the templates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub marketplace: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price,
            marketplace: Some(product.marketplace.clone()),
        }
    }
}

/// Competitor (or comparison-input) product summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorView {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Short free-text feature summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
}

/// Builds the prompt for one insight request.
///
/// Shape: analyst preamble, the product facts as labeled lines (present
/// fields only), the optional free-text context appended verbatim, then a
/// type-specific instruction tail. For `competitor_analysis`, supplied
/// competitors are embedded as labeled blocks.
pub fn build_prompt(
    insight_type: InsightType,
    product: &ProductView,
    context: Option<&str>,
    competitors: &[CompetitorView],
) -> String {
    let facts = product_facts(product, context);

    match insight_type {
        InsightType::General => format!(
            "{ANALYST_PREAMBLE}\n\n\
             Provide comprehensive insights about this product:\n\n\
             {facts}\n\n\
             Please provide:\n\
             1. Market overview and fit\n\
             2. Key strengths and opportunities\n\
             3. Pricing sanity check\n\
             4. Potential challenges\n\
             5. Suggested improvements and next steps"
        ),
        InsightType::TrendAnalysis => format!(
            "{ANALYST_PREAMBLE}\n\n\
             Analyze the following product and provide trend insights:\n\n\
             {facts}\n\n\
             Please provide:\n\
             1. Current demand trend direction for this product\n\
             2. Demand indicators\n\
             3. Seasonal patterns (if applicable)\n\
             4. Growth or decline signals\n\
             5. Key recommendations"
        ),
        InsightType::PricingInsight => format!(
            "{ANALYST_PREAMBLE}\n\n\
             Analyze the pricing strategy for this product:\n\n\
             {facts}\n\n\
             Please provide:\n\
             1. Price competitiveness relative to category norms\n\
             2. An explicit recommended price range\n\
             3. Price positioning in the market\n\
             4. Discount opportunities\n\
             5. Value proposition assessment"
        ),
        InsightType::CompetitorAnalysis => {
            let mut prompt = format!(
                "{ANALYST_PREAMBLE}\n\n\
                 Analyze competitors for this product:\n\n\
                 {facts}"
            );
            if !competitors.is_empty() {
                prompt.push_str("\n\nCompetitors:\n");
                prompt.push_str(&competitor_blocks(competitors));
            }
            prompt.push_str(
                "\n\nPlease provide:\n\
                 1. Side-by-side comparative judgment\n\
                 2. Key differentiators\n\
                 3. Competitive advantages and disadvantages\n\
                 4. Market positioning\n\
                 5. Strategic recommendations",
            );
            prompt
        }
    }
}

/// Builds the single comparative prompt over the given products.
///
/// Products are listed as numbered blocks in the given order; order is
/// preserved verbatim.
pub fn build_comparison_prompt(products: &[CompetitorView]) -> String {
    format!(
        "{COMPARISON_PREAMBLE}\n\n\
         Compare the following products focusing on: price, features, quality, value\n\n\
         {blocks}\n\n\
         Please provide:\n\
         1. Side-by-side comparison\n\
         2. Strengths and weaknesses of each product\n\
         3. Best value recommendation\n\
         4. Target audience for each product\n\
         5. Final recommendation",
        blocks = numbered_blocks(products)
    )
}

/// Product facts as labeled lines; absent fields are omitted, description
/// text is passed through untruncated.
fn product_facts(product: &ProductView, context: Option<&str>) -> String {
    let mut lines = vec![format!("Product: {}", product.name)];

    if let Some(description) = &product.description {
        lines.push(format!("Description: {description}"));
    }
    if let Some(category) = &product.category {
        lines.push(format!("Category: {category}"));
    }
    if let Some(price) = product.price {
        lines.push(format!("Price: ${price:.2}"));
    }
    if let Some(marketplace) = &product.marketplace {
        lines.push(format!("Marketplace: {marketplace}"));
    }
    if let Some(context) = context {
        lines.push(format!("Additional Context: {context}"));
    }

    lines.join("\n")
}

fn competitor_blocks(competitors: &[CompetitorView]) -> String {
    competitors
        .iter()
        .map(|c| {
            let mut block = format!("- {}", c.name);
            if let Some(price) = c.price {
                block.push_str(&format!(" (${price:.2})"));
            }
            if let Some(features) = &c.features {
                block.push_str(&format!(": {features}"));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered_blocks(products: &[CompetitorView]) -> String {
    products
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut block = format!("Product {}:\nName: {}", i + 1, p.name);
            if let Some(price) = p.price {
                block.push_str(&format!("\nPrice: ${price:.2}"));
            }
            if let Some(features) = &p.features {
                block.push_str(&format!("\nFeatures: {features}"));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ALL_TYPES: [InsightType; 4] = [
        InsightType::General,
        InsightType::TrendAnalysis,
        InsightType::PricingInsight,
        InsightType::CompetitorAnalysis,
    ];

    fn mouse() -> ProductView {
        ProductView {
            name: "Wireless Mouse".into(),
            description: Some("Ergonomic 2.4GHz mouse with silent clicks".into()),
            category: Some("Computer Accessories".into()),
            price: Some(29.99),
            marketplace: Some("amazon".into()),
        }
    }

    #[test]
    fn every_type_is_deterministic() {
        let view = mouse();
        for ty in ALL_TYPES {
            let a = build_prompt(ty, &view, Some("Q4 push"), &[]);
            let b = build_prompt(ty, &view, Some("Q4 push"), &[]);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn every_supplied_field_appears_verbatim() {
        let view = mouse();
        for ty in ALL_TYPES {
            let prompt = build_prompt(ty, &view, Some("Q4 holiday push"), &[]);
            assert!(prompt.contains("Wireless Mouse"));
            assert!(prompt.contains("Ergonomic 2.4GHz mouse with silent clicks"));
            assert!(prompt.contains("Category: Computer Accessories"));
            assert!(prompt.contains("Price: $29.99"));
            assert!(prompt.contains("Marketplace: amazon"));
            assert!(prompt.contains("Additional Context: Q4 holiday push"));
        }
    }

    #[test]
    fn absent_fields_are_omitted() {
        let view = ProductView {
            name: "Bare".into(),
            description: None,
            category: None,
            price: None,
            marketplace: None,
        };
        let prompt = build_prompt(InsightType::General, &view, None, &[]);
        assert!(prompt.contains("Product: Bare"));
        assert!(!prompt.contains("Description:"));
        assert!(!prompt.contains("Price:"));
        assert!(!prompt.contains("Additional Context:"));
    }

    #[test]
    fn competitor_prompt_embeds_competitor_blocks() {
        let competitors = vec![
            CompetitorView {
                name: "Logi M185".into(),
                price: Some(14.99),
                features: Some("compact, 12-month battery".into()),
            },
            CompetitorView {
                name: "MX Anywhere".into(),
                price: None,
                features: None,
            },
        ];
        let prompt = build_prompt(InsightType::CompetitorAnalysis, &mouse(), None, &competitors);
        assert!(prompt.contains("Competitors:"));
        assert!(prompt.contains("- Logi M185 ($14.99): compact, 12-month battery"));
        assert!(prompt.contains("- MX Anywhere"));
    }

    #[test]
    fn unicode_passes_through_untouched() {
        let view = ProductView {
            name: "Café Grinder ☕".into(),
            description: Some("Mühle aus Edelstahl — 40 Mahlgrade".into()),
            category: None,
            price: None,
            marketplace: None,
        };
        let prompt = build_prompt(InsightType::TrendAnalysis, &view, None, &[]);
        assert!(prompt.contains("Café Grinder ☕"));
        assert!(prompt.contains("Mühle aus Edelstahl — 40 Mahlgrade"));
    }

    #[test]
    fn comparison_prompt_preserves_input_order() {
        let products = vec![
            CompetitorView {
                name: "First".into(),
                price: Some(10.0),
                features: Some("a".into()),
            },
            CompetitorView {
                name: "Second".into(),
                price: Some(20.0),
                features: Some("b".into()),
            },
        ];
        let prompt = build_comparison_prompt(&products);
        let first = prompt.find("Product 1:\nName: First").unwrap();
        let second = prompt.find("Product 2:\nName: Second").unwrap();
        assert!(first < second);
        assert!(prompt.contains("price, features, quality, value"));
    }
}
