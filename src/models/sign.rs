// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Holiday sign: a base plate and a separately printed text piece

use super::params::SignParams;
use super::part::{Part, PartSet};
use super::text::{find_font, load_font, text_profile};
use crate::error::{ModelError, ModelResult};
use crate::geometry::Profile;
use crate::utils::{inches, slugify};
use std::path::Path;

pub const BASE_FILE_NAME: &str = "sign_base.stl";

/// File name of the text piece ("Happy Holidays" -> "happy_holidays_text.stl")
pub fn text_file_name(text: &str) -> String {
    format!("{}_text.stl", slugify(text))
}

/// Build both sign parts.
///
/// `font` names a font file explicitly; a missing explicit font is an
/// error. Without one the platform defaults are searched, and if none is
/// usable the text piece becomes a placeholder plate with a note.
pub fn build(params: &SignParams, font: Option<&Path>) -> ModelResult<PartSet> {
    params.validate()?;

    let mut notes = Vec::new();
    let font_data = match find_font(font) {
        Ok(path) => Some(load_font(&path)?),
        Err(ModelError::NoFontAvailable) => {
            notes.push("no default font found; text piece is a placeholder plate".to_string());
            None
        }
        Err(e) => return Err(e),
    };

    let (base, text) = rayon::join(
        || base_part(params),
        || text_part(params, font_data.as_deref()),
    );
    let (text, note) = text?;
    notes.extend(note);

    let mut set = PartSet::new("holiday sign");
    set.parts = vec![base?, text];
    set.notes = notes;
    Ok(set)
}

fn base_part(params: &SignParams) -> ModelResult<Part> {
    let (w, h, d) = (inches(params.width), inches(params.height), inches(params.depth));
    let plate = Profile::centered_rect(0.0, 0.0, w, h);
    Ok(Part::from_profile("sign base", BASE_FILE_NAME, &plate, d)?
        .with_description("rectangular base plate")
        .with_nominal_size([Some(w), Some(h), Some(d)]))
}

/// Text piece from the font outline, or the placeholder plate together
/// with the reason it was used
fn text_part(
    params: &SignParams,
    font_data: Option<&[u8]>,
) -> ModelResult<(Part, Option<String>)> {
    let outline = match font_data {
        Some(data) => match text_profile(&params.text, data, inches(params.font_size)) {
            Ok(profile) => Ok(profile),
            Err(e @ (ModelError::FontParse(_) | ModelError::EmptyText(_))) => Err(e.to_string()),
            Err(e) => return Err(e),
        },
        None => Err("no font".to_string()),
    };
    lettering(params, outline, font_data.is_some())
}

/// Extrude the text outline. An outline that is missing or cannot be
/// extruded gives the placeholder plate, with a note when a font was loaded.
fn lettering(
    params: &SignParams,
    outline: Result<Profile, String>,
    has_font: bool,
) -> ModelResult<(Part, Option<String>)> {
    let name = format!("\"{}\" text", params.text);
    let file_name = text_file_name(&params.text);
    let depth = inches(params.text_depth);

    let reason = match outline {
        Ok(profile) => match Part::from_profile(&name, &file_name, &profile, depth) {
            Ok(part) => {
                let part = part
                    .with_description("extruded lettering")
                    .with_nominal_size([None, None, Some(depth)]);
                return Ok((part, None));
            }
            Err(e) => format!("text outline could not be extruded: {e}"),
        },
        Err(reason) => reason,
    };

    let (w, h) = placeholder_size(params);
    let plate = Profile::centered_rect(0.0, 0.0, w, h);
    let part = Part::from_profile(name, file_name, &plate, depth)?
        .with_description("placeholder backing plate")
        .with_nominal_size([Some(w), Some(h), Some(depth)]);
    let note = has_font.then(|| format!("{reason}; text piece is a placeholder plate"));
    Ok((part, note))
}

/// Placeholder plate size in mm
pub fn placeholder_size(params: &SignParams) -> (f64, f64) {
    let chars = params.text.chars().count() as f64;
    let font = inches(params.font_size);
    (
        chars * params.fallback_width_per_char * font,
        params.fallback_height_factor * font,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::analyze;
    use approx::assert_relative_eq;

    #[test]
    fn test_text_file_name() {
        assert_eq!(text_file_name("Happy Holidays"), "happy_holidays_text.stl");
    }

    #[test]
    fn test_base_part() {
        let part = base_part(&SignParams::default()).unwrap();
        let stats = analyze(&part.mesh);

        assert!(stats.is_watertight);
        assert_eq!(part.file_name, "sign_base.stl");
        assert_relative_eq!(stats.size()[0], 203.2, epsilon = 1e-9);
        assert_relative_eq!(stats.size()[1], 152.4, epsilon = 1e-9);
        assert_relative_eq!(stats.size()[2], 25.4, epsilon = 1e-9);
    }

    #[test]
    fn test_placeholder_without_font() {
        let params = SignParams::default();
        let (part, note) = text_part(&params, None).unwrap();
        let size = analyze(&part.mesh).size();

        // 14 characters * 0.7in, 1.5in tall, 0.5in deep
        assert_relative_eq!(size[0], 14.0 * 0.7 * 25.4, epsilon = 1e-6);
        assert_relative_eq!(size[1], 1.5 * 25.4, epsilon = 1e-6);
        assert_relative_eq!(size[2], 12.7, epsilon = 1e-6);
        assert!(note.is_none());
        assert_eq!(part.nominal_size[0], Some(placeholder_size(&params).0));
    }

    #[test]
    fn test_placeholder_for_unparseable_font() {
        let (part, note) = text_part(&SignParams::default(), Some(b"garbage")).unwrap();
        assert!(analyze(&part.mesh).is_watertight);
        assert!(note.unwrap().contains("placeholder"));
    }

    #[test]
    fn test_placeholder_when_outline_cannot_be_extruded() {
        let params = SignParams::default();
        let (part, note) = lettering(&params, Ok(Profile::empty()), true).unwrap();
        let stats = analyze(&part.mesh);

        assert!(stats.is_watertight);
        assert_eq!(part.file_name, "happy_holidays_text.stl");
        assert_eq!(part.description, "placeholder backing plate");
        assert_relative_eq!(stats.size()[0], placeholder_size(&params).0, epsilon = 1e-6);
        let note = note.unwrap();
        assert!(note.contains("could not be extruded"), "{note}");
        assert!(note.contains("placeholder"), "{note}");
    }

    #[test]
    fn test_lettering_from_outline() {
        let params = SignParams::default();
        let outline = Profile::centered_rect(0.0, 0.0, 30.0, 10.0);
        let (part, note) = lettering(&params, Ok(outline), true).unwrap();

        assert!(note.is_none());
        assert_eq!(part.description, "extruded lettering");
        assert_eq!(part.nominal_size, [None, None, Some(12.7)]);
    }

    #[test]
    fn test_missing_explicit_font_fails() {
        let result = build(&SignParams::default(), Some(Path::new("/no/such/font.ttf")));
        assert!(matches!(result, Err(ModelError::FontNotFound(_))));
    }

    #[test]
    fn test_build_has_two_parts() {
        let set = build(&SignParams::default(), None).unwrap();
        assert_eq!(set.parts.len(), 2);
        assert_eq!(set.parts[0].file_name, "sign_base.stl");
        assert_eq!(set.parts[1].file_name, "happy_holidays_text.stl");
        for part in &set.parts {
            assert!(analyze(&part.mesh).is_watertight, "{} is open", part.name);
        }
    }
}
