//! Temperature, maximum length and top-p sliders for the chat pages.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::MAX_TOKENS_LIMIT;
use crate::dom_utils::{self, el};
use crate::i18n::{t, Label, Language};
use crate::messages::Message;
use crate::state::{ChatTarget, SamplingField, SamplingSettings};

struct Slider {
    field: SamplingField,
    id: &'static str,
    label: Label,
    min: f64,
    max: f64,
    step: f64,
}

const SLIDERS: [Slider; 3] = [
    Slider {
        field: SamplingField::Temperature,
        id: "sampling-temperature",
        label: Label::Temperature,
        min: 0.0,
        max: 1.0,
        step: 0.1,
    },
    Slider {
        field: SamplingField::MaxTokens,
        id: "sampling-max-tokens",
        label: Label::MaximumLength,
        min: 1.0,
        max: MAX_TOKENS_LIMIT as f64,
        step: 1.0,
    },
    Slider {
        field: SamplingField::TopP,
        id: "sampling-top-p",
        label: Label::TopP,
        min: 0.0,
        max: 1.0,
        step: 0.1,
    },
];

fn display(settings: &SamplingSettings, field: SamplingField) -> String {
    match field {
        SamplingField::Temperature => format!("{:.1}", settings.temperature),
        SamplingField::MaxTokens => settings.max_tokens.to_string(),
        SamplingField::TopP => format!("{:.1}", settings.top_p),
    }
}

pub fn build(
    document: &Document,
    target: ChatTarget,
    settings: &SamplingSettings,
    lang: Language,
) -> Result<Element, JsValue> {
    let panel = el(document, "div", "sampling-controls", "")?;

    for slider in &SLIDERS {
        let row = el(document, "div", "sampling-row", "")?;

        let header = el(document, "div", "sampling-header", "")?;
        let label = el(document, "label", "field-label", t(lang, slider.label))?;
        label.set_attribute("for", slider.id)?;
        header.append_child(&label)?;
        let value = el(document, "span", "sampling-value", &display(settings, slider.field))?;
        value.set_id(&format!("{}-value", slider.id));
        header.append_child(&value)?;
        row.append_child(&header)?;

        let input = document.create_element("input")?;
        input.set_id(slider.id);
        input.set_attribute("type", "range")?;
        input.set_attribute("min", &slider.min.to_string())?;
        input.set_attribute("max", &slider.max.to_string())?;
        input.set_attribute("step", &slider.step.to_string())?;
        input.set_attribute("value", &display(settings, slider.field))?;
        let field = slider.field;
        dom_utils::on_value(&input, "input", move |raw| {
            raw.parse::<f64>().ok().map(|value| Message::SamplingChanged {
                target,
                field,
                value,
            })
        })?;
        row.append_child(&input)?;

        panel.append_child(&row)?;
    }

    Ok(panel)
}

/// Update read-outs and slider positions in place.
pub fn refresh(document: &Document, settings: &SamplingSettings) -> Result<(), JsValue> {
    for slider in &SLIDERS {
        let text = display(settings, slider.field);
        if let Some(value) = document.get_element_by_id(&format!("{}-value", slider.id)) {
            value.set_text_content(Some(&text));
        }
        if let Some(input) = document.get_element_by_id(slider.id) {
            dom_utils::set_control_value(&input, &text);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_outs_use_one_decimal() {
        let settings = SamplingSettings::with_max_tokens(128);
        assert_eq!(display(&settings, SamplingField::Temperature), "0.6");
        assert_eq!(display(&settings, SamplingField::TopP), "0.9");
        assert_eq!(display(&settings, SamplingField::MaxTokens), "128");
    }
}
