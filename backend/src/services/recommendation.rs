//! Taste profile statistics and LLM preference analysis

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use sqlx::PgPool;

use super::TastingService;
use crate::error::{AppError, AppResult};
use crate::external::{CompletionOptions, LlmClient};
use crate::models::TastingSession;

pub const NO_TASTINGS_PROFILE_MESSAGE: &str =
    "No tasting data found. Start logging your coffee tastings to build your taste profile!";

pub const NO_TASTINGS_ANALYSIS_MESSAGE: &str =
    "No tasting data available. Start logging your coffee tastings to get personalized recommendations!";

pub const ANALYSIS_NOTE: &str =
    "This is a flavor preference analysis. Coffee recommendations coming in future versions!";

const SYSTEM_PROMPT: &str = "You are a professional coffee cupper and flavor expert. \
    Provide detailed, actionable analysis of coffee preferences based on tasting data. \
    Be specific and helpful.";

const ANALYSIS_OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.7,
    max_tokens: 1500,
};

/// Sessions rendered into the analysis prompt
const PROMPT_TASTING_LIMIT: usize = 10;

const TOP_FLAVORS: usize = 10;
const TOP_BREW_METHODS: usize = 5;

// ============================================================================
// Taste profile
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum TasteProfile {
    Empty {
        total_tastings: usize,
        message: String,
    },
    Profile {
        total_tastings: usize,
        average_rating: Option<f64>,
        /// `[name, count]` pairs, most frequent first
        most_common_flavors: Vec<(String, usize)>,
        preferred_brew_methods: Vec<(String, usize)>,
        taste_profile_summary: String,
    },
}

/// Occurrence counter that remembers first-seen order for ties
#[derive(Default)]
struct Tally {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.counts.len());
                self.counts.push((key.to_string(), 1));
            }
        }
    }

    /// Most frequent first; stable for equal counts
    fn top(mut self, n: usize) -> Vec<(String, usize)> {
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts.truncate(n);
        self.counts
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn average(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
    Some(sum as f64 / values.len() as f64)
}

/// Summarize a user's sessions
pub fn build_taste_profile(tastings: &[TastingSession]) -> TasteProfile {
    if tastings.is_empty() {
        return TasteProfile::Empty {
            total_tastings: 0,
            message: NO_TASTINGS_PROFILE_MESSAGE.to_string(),
        };
    }

    let mut flavors = Tally::default();
    let mut methods = Tally::default();
    let mut ratings = Vec::new();

    for tasting in tastings {
        if let Some(rating) = tasting.overall_rating {
            ratings.push(rating);
        }
        methods.add(tasting.brew_method.as_str());
        for note in &tasting.tasting_notes {
            flavors.add(&note.flavor_tag.name);
        }
    }

    let average_rating = average(&ratings).map(round1);
    let rating_display = average_rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "N/A".to_string());

    TasteProfile::Profile {
        total_tastings: tastings.len(),
        average_rating,
        most_common_flavors: flavors.top(TOP_FLAVORS),
        preferred_brew_methods: methods.top(TOP_BREW_METHODS),
        taste_profile_summary: format!(
            "Based on {} coffee tastings with an average rating of {}",
            tastings.len(),
            rating_display
        ),
    }
}

// ============================================================================
// Tasting summary for analysis
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TastingSummary {
    pub total_tastings: usize,
    pub tastings: Vec<TastingDigest>,
    pub flavor_frequency: BTreeMap<String, usize>,
    pub average_rating_by_flavor: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TastingDigest {
    pub coffee: CoffeeDigest,
    pub flavors: Vec<FlavorDigest>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CoffeeDigest {
    pub coffee_name: String,
    pub roaster: String,
    pub overall_rating: Option<i32>,
    pub would_buy_again: Option<bool>,
    pub brew_method: String,
    pub session_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlavorDigest {
    pub flavor: String,
    pub category: Option<String>,
    pub intensity: Option<i32>,
    pub detected_in: DetectedIn,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct DetectedIn {
    pub aroma: bool,
    pub flavor: bool,
    pub aftertaste: bool,
}

/// Structure sessions for the analysis prompt
pub fn build_tasting_summary(tastings: &[TastingSession]) -> TastingSummary {
    let mut flavor_frequency: BTreeMap<String, usize> = BTreeMap::new();
    let mut ratings_by_flavor: BTreeMap<String, Vec<i32>> = BTreeMap::new();

    let digests = tastings
        .iter()
        .map(|tasting| {
            let flavors = tasting
                .tasting_notes
                .iter()
                .map(|note| {
                    let name = note.flavor_tag.name.clone();
                    *flavor_frequency.entry(name.clone()).or_default() += 1;
                    let ratings = ratings_by_flavor.entry(name.clone()).or_default();
                    if let Some(rating) = tasting.overall_rating {
                        ratings.push(rating);
                    }

                    FlavorDigest {
                        flavor: name,
                        category: note.flavor_tag.category.clone(),
                        intensity: note.intensity,
                        detected_in: DetectedIn {
                            aroma: note.aroma,
                            flavor: note.flavor,
                            aftertaste: note.aftertaste,
                        },
                    }
                })
                .collect();

            TastingDigest {
                coffee: CoffeeDigest {
                    coffee_name: tasting
                        .coffee_name
                        .clone()
                        .unwrap_or_else(|| "Unknown".to_string()),
                    roaster: tasting
                        .roaster_name
                        .clone()
                        .unwrap_or_else(|| "Unknown".to_string()),
                    overall_rating: tasting.overall_rating,
                    would_buy_again: tasting.would_buy_again,
                    brew_method: tasting.brew_method.as_str().to_string(),
                    session_notes: tasting.session_notes.clone(),
                },
                flavors,
            }
        })
        .collect();

    let average_rating_by_flavor = ratings_by_flavor
        .into_iter()
        .filter_map(|(flavor, ratings)| average(&ratings).map(|avg| (flavor, round1(avg))))
        .collect();

    TastingSummary {
        total_tastings: tastings.len(),
        tastings: digests,
        flavor_frequency,
        average_rating_by_flavor,
    }
}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string())
}

/// Render the user prompt from a summary
pub fn build_analysis_prompt(summary: &TastingSummary) -> String {
    let mut by_frequency: Vec<(&String, &usize)> = summary.flavor_frequency.iter().collect();
    by_frequency.sort_by(|a, b| b.1.cmp(a.1));

    let common = by_frequency
        .iter()
        .take(TOP_FLAVORS)
        .map(|(flavor, count)| format!("{} ({})", flavor, count))
        .collect::<Vec<_>>()
        .join(", ");
    let ratings = summary
        .average_rating_by_flavor
        .iter()
        .map(|(flavor, avg)| format!("{}: {:.1}", flavor, avg))
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!(
        "Analyze this coffee taster's preferences based on their tasting history:\n\n\
         TASTING SUMMARY:\n\
         - Total tastings: {}\n\
         - Most common flavors: {}\n\
         - Average ratings by flavor: {}\n\
         \nDETAILED TASTING HISTORY:\n",
        summary.total_tastings, common, ratings
    );

    for tasting in summary.tastings.iter().take(PROMPT_TASTING_LIMIT) {
        let coffee = &tasting.coffee;
        let flavors = tasting
            .flavors
            .iter()
            .map(|f| format!("{} (intensity: {})", f.flavor, or_na(f.intensity)))
            .collect::<Vec<_>>()
            .join(", ");

        prompt.push_str(&format!(
            "\nCoffee: {} by {}\n\
             Rating: {}/10 | Would buy again: {}\n\
             Brew method: {}\n\
             Flavors detected: {}\n\
             Notes: {}\n\
             ---\n",
            coffee.coffee_name,
            coffee.roaster,
            or_na(coffee.overall_rating),
            or_na(coffee.would_buy_again),
            coffee.brew_method,
            flavors,
            coffee.session_notes.as_deref().unwrap_or("None"),
        ));
    }

    prompt.push_str(
        "\nBased on this tasting history, provide a comprehensive analysis:\n\n\
         1. FLAVOR PREFERENCES: What flavor profiles does this person prefer?\n\
         2. INTENSITY PREFERENCES: Do they prefer subtle or bold flavors?\n\
         3. COFFEE STYLE: What types of coffees should they seek out?\n\
         4. BREWING RECOMMENDATIONS: Any patterns in their preferred brewing methods?\n\
         5. FLAVOR DISCOVERY: What new flavors might they enjoy?\n\n\
         Provide specific, actionable recommendations for their next coffee purchase.\n\
         Format your response in clear sections with specific recommendations.\n",
    );

    prompt
}

// ============================================================================
// Service
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PreferenceAnalysis {
    pub user_id: String,
    pub total_tastings: usize,
    pub flavor_analysis: String,
    pub data_summary: TastingSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub analysis: PreferenceAnalysis,
    pub mvp_note: String,
}

#[derive(Clone)]
pub struct RecommendationService {
    tastings: TastingService,
    llm: Option<LlmClient>,
}

impl RecommendationService {
    /// `llm` is the process-wide client held in application state
    pub fn new(db: PgPool, llm: Option<LlmClient>) -> Self {
        Self {
            tastings: TastingService::new(db),
            llm,
        }
    }

    pub async fn taste_profile(&self, user_id: &str) -> AppResult<TasteProfile> {
        let tastings = self.tastings.all_for_user(user_id).await?;
        Ok(build_taste_profile(&tastings))
    }

    /// Ask the LLM to interpret the user's history.
    ///
    /// Upstream failures are reported inside the analysis text.
    pub async fn analyze(&self, user_id: &str) -> AppResult<AnalysisResponse> {
        let llm = self.llm.as_ref().ok_or_else(|| {
            tracing::error!(user_id, "OPENAI_API_KEY is not configured");
            AppError::Configuration("Recommendation service not properly configured".to_string())
        })?;

        let tastings = self.tastings.all_for_user(user_id).await?;
        let summary = build_tasting_summary(&tastings);

        let flavor_analysis = if summary.total_tastings == 0 {
            NO_TASTINGS_ANALYSIS_MESSAGE.to_string()
        } else {
            let prompt = build_analysis_prompt(&summary);
            match llm.complete(SYSTEM_PROMPT, &prompt, ANALYSIS_OPTIONS).await {
                Ok(Some(text)) => text,
                Ok(None) => "Unable to generate analysis.".to_string(),
                Err(e) => {
                    tracing::error!(user_id, error = %e, "LLM analysis failed");
                    format!("Error analyzing preferences: {}", e)
                }
            }
        };

        Ok(AnalysisResponse {
            success: true,
            analysis: PreferenceAnalysis {
                user_id: user_id.to_string(),
                total_tastings: summary.total_tastings,
                flavor_analysis,
                data_summary: summary,
            },
            mvp_note: ANALYSIS_NOTE.to_string(),
        })
    }
}
