// ABOUTME: Schema normalization from local rows and external payloads into preview and detail shapes
// ABOUTME: Owns every field-name, default-value, and boolean-encoding difference between the two sources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

//! Recipe normalization
//!
//! The local table stores booleans as 0/1 and the cooking time as free text
//! (`"45 minutes"`); the external API uses native booleans and a minute
//! count. Everything downstream only sees [`RecipePreview`] and
//! [`RecipeDetail`].

use crate::constants::defaults;
use crate::models::{
    ExternalRecipePayload, InstructionStep, LocalRecipeRecord, RecipeDetail, RecipePreview,
};
use regex::Regex;
use std::sync::OnceLock;

fn html_tag_regex() -> Option<&'static Regex> {
    static HTML_TAG_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    HTML_TAG_REGEX
        .get_or_init(|| Regex::new(r"<[^>]*>").ok())
        .as_ref()
}

/// Minutes from a free-text cooking time
///
/// Reads the leading integer (`"45 minutes"` is 45). Absent, zero, or
/// unparseable values fall back to the default.
#[must_use]
pub fn parse_cook_minutes(cook_time: Option<&str>) -> u32 {
    cook_time
        .map(str::trim)
        .and_then(|text| {
            let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u32>().ok()
        })
        .filter(|minutes| *minutes > 0)
        .unwrap_or(defaults::READY_IN_MINUTES)
}

fn image_or_placeholder(image: Option<&str>) -> String {
    image
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(defaults::PLACEHOLDER_IMAGE)
        .to_owned()
}

fn number_steps<I>(texts: I) -> Vec<InstructionStep>
where
    I: IntoIterator<Item = String>,
{
    let steps: Vec<InstructionStep> = texts
        .into_iter()
        .zip(1..)
        .map(|(step, number)| InstructionStep { number, step })
        .collect();

    if steps.is_empty() {
        vec![InstructionStep {
            number: 1,
            step: defaults::NO_INSTRUCTIONS_STEP.to_owned(),
        }]
    } else {
        steps
    }
}

/// Steps of a local recipe: one per non-empty line
#[must_use]
pub fn split_local_steps(instructions: Option<&str>) -> Vec<InstructionStep> {
    number_steps(
        instructions
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned),
    )
}

/// Remove markup tags and the entities the external API commonly emits
#[must_use]
pub fn strip_html(text: &str) -> String {
    let stripped = html_tag_regex().map_or_else(
        || text.to_owned(),
        |re| re.replace_all(text, " ").into_owned(),
    );
    stripped
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Steps of free instruction text: markup removed, split after `.`, `!` or `?` that ends a sentence
#[must_use]
pub fn split_sentence_steps(instructions: &str) -> Vec<InstructionStep> {
    let text = strip_html(instructions);
    let mut sentences = Vec::new();
    let mut current = String::new();

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        current.push(ch);
        // "1.5 cups" stays whole: only punctuation before whitespace or the end closes a step
        let at_boundary = chars.peek().map_or(true, |next| next.is_whitespace());
        if matches!(ch, '.' | '!' | '?') && at_boundary {
            sentences.push(std::mem::take(&mut current));
        }
    }
    sentences.push(current);

    number_steps(
        sentences
            .iter()
            .map(|sentence| sentence.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|sentence| !sentence.is_empty()),
    )
}

/// Preview of a stored recipe
#[must_use]
pub fn normalize_local_preview(record: &LocalRecipeRecord) -> RecipePreview {
    RecipePreview {
        id: record.recipe_id,
        title: record.title.clone(),
        ready_in_minutes: parse_cook_minutes(record.cook_time.as_deref()),
        image: image_or_placeholder(record.image.as_deref()),
        popularity: record.likes.unwrap_or(defaults::POPULARITY),
        vegan: record.is_vegan == 1,
        vegetarian: record.is_vegetarian == 1,
        gluten_free: record.is_gluten_free == 1,
        instructions: record.instructions.clone(),
    }
}

/// Detail of a stored recipe; viewer flags start false
#[must_use]
pub fn normalize_local_detail(record: &LocalRecipeRecord, ingredients: Vec<String>) -> RecipeDetail {
    RecipeDetail {
        preview: normalize_local_preview(record),
        servings: record.servings.and_then(|s| u32::try_from(s).ok()),
        ingredients,
        steps: split_local_steps(record.instructions.as_deref()),
        is_favorite: false,
        is_watched: false,
        is_user_recipe: true,
    }
}

/// Preview of an external recipe
#[must_use]
pub fn normalize_external_preview(payload: &ExternalRecipePayload) -> RecipePreview {
    RecipePreview {
        id: payload.id.into(),
        title: payload.title.clone(),
        ready_in_minutes: payload
            .ready_in_minutes
            .filter(|minutes| *minutes > 0)
            .unwrap_or(defaults::READY_IN_MINUTES),
        image: image_or_placeholder(payload.image.as_deref()),
        popularity: payload.aggregate_likes.unwrap_or(defaults::POPULARITY),
        vegan: payload.vegan,
        vegetarian: payload.vegetarian,
        gluten_free: payload.gluten_free,
        instructions: payload.instructions.clone(),
    }
}

fn external_steps(payload: &ExternalRecipePayload) -> Vec<InstructionStep> {
    let analyzed: Vec<String> = payload
        .analyzed_instructions
        .iter()
        .flatten()
        .flat_map(|section| section.steps.iter())
        .map(|step| step.step.trim().to_owned())
        .filter(|step| !step.is_empty())
        .collect();

    if analyzed.is_empty() {
        split_sentence_steps(payload.instructions.as_deref().unwrap_or_default())
    } else {
        number_steps(analyzed)
    }
}

/// Detail of an external recipe; viewer flags start false
#[must_use]
pub fn normalize_external_detail(payload: &ExternalRecipePayload) -> RecipeDetail {
    RecipeDetail {
        preview: normalize_external_preview(payload),
        servings: payload.servings,
        ingredients: payload
            .extended_ingredients
            .iter()
            .flatten()
            .filter_map(|ingredient| ingredient.display_text().map(str::to_owned))
            .collect(),
        steps: external_steps(payload),
        is_favorite: false,
        is_watched: false,
        is_user_recipe: false,
    }
}
