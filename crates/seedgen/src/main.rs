//! VentureDesk seed-data generator
//!
//! Calls a text-generation API to produce a batch of companies with products
//! for each industry, then writes the accumulated seed document consumed by
//! POST /load-data.

mod client;

use std::time::Duration;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use validator::Validate;
use venturedesk_common::config::AppConfig;
use venturedesk_common::db::models::{CompanyInput, ProductInput};
use venturedesk_common::errors::AppError;
use venturedesk_common::seed::{SeedCompany, SeedDocument};

use client::{strip_code_fences, GeneratorClient};

const INDUSTRIES: [&str; 5] = ["FinTech", "HealthTech", "EdTech", "E-commerce", "SaaS"];

/// Pause between consecutive generation calls
const PACING: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level)),
        )
        .init();

    let client = GeneratorClient::new(&config.generator)?;

    let per_industry = config.generator.companies_per_industry;
    info!(
        total = INDUSTRIES.len() as u32 * per_industry,
        industries = INDUSTRIES.len(),
        "Generating seed companies"
    );

    let mut companies = Vec::new();
    'generation: for industry in INDUSTRIES {
        for _ in 0..per_industry {
            match generate_company(&client, industry).await {
                Ok(record) => {
                    info!(
                        company = %record.company.name,
                        industry,
                        products = record.products.len(),
                        "Company generated"
                    );
                    companies.push(record);
                }
                Err(err) => {
                    error!(industry, error = %err, "Company generation failed, stopping");
                    break 'generation;
                }
            }

            tokio::time::sleep(PACING).await;
        }
    }

    let document = SeedDocument { companies };
    let raw = serde_json::to_string_pretty(&document)?;
    tokio::fs::write(&config.seed.path, raw)
        .await
        .with_context(|| format!("failed to write {}", config.seed.path))?;

    info!(
        companies = document.companies.len(),
        products = document
            .companies
            .iter()
            .map(|c| c.products.len())
            .sum::<usize>(),
        path = %config.seed.path,
        "Seed document written"
    );

    Ok(())
}

/// Generate one company and its products for `industry`.
async fn generate_company(
    client: &GeneratorClient,
    industry: &str,
) -> venturedesk_common::Result<SeedCompany> {
    let raw = client.generate(&company_prompt(industry)).await?;
    let company: CompanyInput =
        serde_json::from_str(strip_code_fences(&raw)).map_err(|e| AppError::Upstream {
            message: format!("company payload did not parse: {e}"),
        })?;
    company.validate().map_err(|e| AppError::Validation {
        message: format!("generated company '{}': {}", company.name, e),
        field: None,
    })?;

    tokio::time::sleep(PACING).await;

    let raw = client
        .generate(&products_prompt(&company.name, industry))
        .await?;
    let products: Vec<ProductInput> =
        serde_json::from_str(strip_code_fences(&raw)).map_err(|e| AppError::Upstream {
            message: format!("products payload did not parse: {e}"),
        })?;
    for product in &products {
        product.validate().map_err(|e| AppError::Validation {
            message: format!("generated product '{}': {}", product.name, e),
            field: None,
        })?;
    }

    Ok(SeedCompany { company, products })
}

fn company_prompt(industry: &str) -> String {
    format!(
        r#"Generate a realistic startup company in the {industry} industry.

Requirements:
- Creative and professional company name (not generic like "TechCorp1")
- Compelling tagline under 100 characters
- Detailed description (2-3 well-written paragraphs) explaining what the company does, its value proposition, and market position
- Founded year between 2015-2024
- Realistic employee count (10-500 for startups)
- Headquarters as "City, Country" format
- Professional website URL

Return ONLY a valid JSON object with this exact structure:
{{
  "name": "Company Name",
  "tagline": "Compelling tagline under 100 chars",
  "description": "Multi-paragraph description...",
  "industry": "{industry}",
  "founded_year": 2021,
  "employee_count": 45,
  "headquarters": "San Francisco, USA",
  "website_url": "www.example.com"
}}

Make it sound professional and realistic, not generic."#
    )
}

fn products_prompt(company_name: &str, industry: &str) -> String {
    format!(
        r#"Generate 3 realistic products for a company named "{company_name}" in the {industry} industry.

Requirements for each product:
- Creative and relevant product name
- Detailed description (2-3 sentences) explaining what it does
- Specific target audience (be precise, not generic)
- 4-6 key features as bullet points (specific and valuable features, not generic)
- Appropriate pricing model: "Free", "Freemium", "Subscription", or "Enterprise"

Return ONLY a valid JSON array with this exact structure:
[
  {{
    "name": "Product Name",
    "description": "Detailed description of what the product does and its benefits...",
    "target_audience": "Specific target audience description",
    "key_features": "• Feature 1\n• Feature 2\n• Feature 3\n• Feature 4\n• Feature 5",
    "pricing_model": "Subscription"
  }}
]

Make features specific and valuable, not generic. Use \n for newlines in key_features."#
    )
}
