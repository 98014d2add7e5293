use crate::models::{Goal, LocalizedText, PlateSource};

/// Short goal label in each supported language.
pub fn goal_label(goal: Goal) -> LocalizedText {
    let (en, si, ta) = match goal {
        Goal::Diabetes => ("Diabetes-Friendly", "දියවැඩියා හිතකාමී", "நீரிழிவு நட்பு"),
        Goal::WeightLoss => ("Weight Loss", "බර අඩු කිරීම", "எடை இழப்பு"),
        Goal::WeightGain => ("Weight Gain", "බර වැඩි කිරීම", "எடை அதிகரிப்பு"),
        Goal::GeneralHealth => ("General Health", "සාමාන්‍ය සෞඛ්‍යය", "பொது ஆரோக்கியம்"),
    };
    LocalizedText {
        en: en.to_string(),
        si: Some(si.to_string()),
        ta: Some(ta.to_string()),
    }
}

pub fn plate_name(goal: Goal) -> LocalizedText {
    let label = goal_label(goal);
    LocalizedText {
        en: format!("{} Sri Lankan Plate", label.en),
        si: label.si.map(|l| format!("{l} ශ්‍රී ලාංකික බත් පිඟාන")),
        ta: label.ta.map(|l| format!("{l} இலங்கை உணவுத் தட்டு")),
    }
}

/// Description for a plate. AI-selected plates use their own wording.
pub fn plate_description(goal: Goal, target_calories: u32, source: PlateSource) -> LocalizedText {
    let label = goal_label(goal);
    match source {
        PlateSource::Ai => LocalizedText {
            en: format!(
                "AI-selected {} plate of about {} kcal, paired from common Sri Lankan foods.",
                label.en.to_lowercase(),
                target_calories
            ),
            si: label.si.map(|l| {
                format!("AI මගින් තෝරාගත් {l} පිඟාන, කැලරි {target_calories} පමණ.")
            }),
            ta: label.ta.map(|l| {
                format!("AI தேர்ந்தெடுத்த {l} தட்டு, சுமார் {target_calories} கலோரி.")
            }),
        },
        PlateSource::Rules | PlateSource::Fallback => LocalizedText {
            en: format!(
                "A balanced {} plate of about {} kcal: rice, a protein, vegetables and a sambol.",
                label.en.to_lowercase(),
                target_calories
            ),
            si: label
                .si
                .map(|l| format!("සමබර {l} පිඟාන, කැලරි {target_calories} පමණ.")),
            ta: label
                .ta
                .map(|l| format!("சமச்சீர் {l} தட்டு, சுமார் {target_calories} கலோரி.")),
        },
    }
}
