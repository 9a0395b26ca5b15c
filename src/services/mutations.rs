//! Pure value transforms over the quiz document. Every operation takes the
//! current quiz and returns a new one; a target id that does not resolve is
//! an explicit `NotFound` error, never a silent no-op.

use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{ButtonAction, Component, ComponentKind, OptionItem, Quiz, Step},
        dto::request::{ComponentPatch, StepPatch, UpdateSettingsRequest},
    },
};

/// Appends a new fully-defaulted step. Returns the updated quiz and the new
/// step's id.
pub fn add_step(quiz: &Quiz) -> (Quiz, String) {
    let mut next = quiz.clone();
    let step = Step::at_position(next.steps.len() + 1);
    let step_id = step.id.clone();
    next.steps.push(step);
    (next, step_id)
}

/// Removes a step, renumbers the remaining ones and nulls every navigation
/// reference that pointed at it. The last remaining step cannot be removed.
pub fn remove_step(quiz: &Quiz, step_id: &str) -> AppResult<Quiz> {
    if quiz.find_step(step_id).is_none() {
        return Err(AppError::NotFound(format!(
            "Step with id '{}' not found",
            step_id
        )));
    }
    if quiz.steps.len() == 1 {
        return Err(AppError::ValidationError(
            "A quiz must keep at least one step".to_string(),
        ));
    }

    let mut next = quiz.clone();
    next.steps.retain(|step| step.id != step_id);

    for (index, step) in next.steps.iter_mut().enumerate() {
        step.name = Step::name_for(index + 1);
        for component in &mut step.components {
            clear_references(component, step_id);
        }
    }

    Ok(next)
}

/// Nulls weak references to a removed step: option links become "end of
/// quiz", `GoToStep` buttons degrade to `Submit`.
fn clear_references(component: &mut Component, removed_step_id: &str) {
    match component {
        Component::Options(options) => {
            for option in &mut options.options {
                if option.next_step_id.as_deref() == Some(removed_step_id) {
                    option.next_step_id = None;
                }
            }
        }
        Component::Button(button) => {
            if matches!(&button.action, ButtonAction::GoToStep { step_id } if step_id == removed_step_id)
            {
                button.action = ButtonAction::Submit;
            }
        }
        Component::Text(_) | Component::Image(_) | Component::Generic(_) => {}
    }
}

/// Shallow-merges the patch into the matching step.
pub fn update_step(quiz: &Quiz, step_id: &str, patch: &StepPatch) -> AppResult<Quiz> {
    let mut next = quiz.clone();
    let step = next
        .steps
        .iter_mut()
        .find(|s| s.id == step_id)
        .ok_or_else(|| AppError::NotFound(format!("Step with id '{}' not found", step_id)))?;

    if let Some(name) = &patch.name {
        step.name = name.clone();
    }
    if let Some(title) = &patch.title {
        step.title = title.clone();
    }
    if let Some(show_logo) = patch.show_logo {
        step.show_logo = show_logo;
    }
    if let Some(show_progress) = patch.show_progress {
        step.show_progress = show_progress;
    }
    if let Some(allow_return) = patch.allow_return {
        step.allow_return = allow_return;
    }
    if let Some(background_image) = &patch.background_image {
        step.background_image = Some(background_image.clone());
    }
    if let Some(background_color) = &patch.background_color {
        step.background_color = Some(background_color.clone());
    }

    Ok(next)
}

/// Appends a defaulted component of the requested kind to the step. Returns
/// the updated quiz and the new component's id.
pub fn add_component(quiz: &Quiz, step_id: &str, kind: ComponentKind) -> AppResult<(Quiz, String)> {
    let mut next = quiz.clone();
    let step = next
        .steps
        .iter_mut()
        .find(|s| s.id == step_id)
        .ok_or_else(|| AppError::NotFound(format!("Step with id '{}' not found", step_id)))?;

    let component = Component::new_default(kind);
    let component_id = component.id().to_string();
    step.components.push(component);

    Ok((next, component_id))
}

/// Shallow-merges a variant-specific patch into the matching component. A
/// patch whose variant does not match the component is a validation error.
pub fn update_component(
    quiz: &Quiz,
    step_id: &str,
    component_id: &str,
    patch: &ComponentPatch,
) -> AppResult<Quiz> {
    let mut next = quiz.clone();
    let step = next
        .steps
        .iter_mut()
        .find(|s| s.id == step_id)
        .ok_or_else(|| AppError::NotFound(format!("Step with id '{}' not found", step_id)))?;
    let component = step
        .components
        .iter_mut()
        .find(|c| c.id() == component_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Component with id '{}' not found", component_id))
        })?;

    apply_component_patch(component, patch)?;
    Ok(next)
}

fn apply_component_patch(component: &mut Component, patch: &ComponentPatch) -> AppResult<()> {
    match (component, patch) {
        (Component::Button(button), ComponentPatch::Button(patch)) => {
            if let Some(text) = &patch.text {
                button.text = text.clone();
            }
            if let Some(action) = &patch.action {
                button.action = action.clone();
            }
            if let Some(size) = patch.size {
                button.size = size;
            }
            if let Some(alignment) = patch.alignment {
                button.alignment = alignment;
            }
            if let Some(color) = &patch.color {
                button.color = color.clone();
            }
            if let Some(border) = &patch.border {
                button.border = border.clone();
            }
            if let Some(padding) = patch.padding {
                button.padding = Some(padding);
            }
            if let Some(margin) = patch.margin {
                button.margin = Some(margin);
            }
            Ok(())
        }
        (Component::Text(text), ComponentPatch::Text(patch)) => {
            if let Some(content) = &patch.content {
                text.content = content.clone();
            }
            if let Some(html_tag) = patch.html_tag {
                text.html_tag = html_tag;
            }
            if let Some(size) = patch.size {
                text.size = size;
            }
            if let Some(color) = &patch.color {
                text.color = color.clone();
            }
            if let Some(alignment) = patch.alignment {
                text.alignment = alignment;
            }
            if let Some(font_family) = &patch.font_family {
                text.font_family = Some(font_family.clone());
            }
            if let Some(font_weight) = &patch.font_weight {
                text.font_weight = Some(font_weight.clone());
            }
            Ok(())
        }
        (Component::Image(image), ComponentPatch::Image(patch)) => {
            if let Some(src) = &patch.src {
                image.src = src.clone();
            }
            if let Some(alt) = &patch.alt {
                image.alt = Some(alt.clone());
            }
            if let Some(size) = patch.size {
                image.size = size;
            }
            if let Some(custom_width) = patch.custom_width {
                image.custom_width = Some(custom_width);
            }
            if let Some(custom_height) = patch.custom_height {
                image.custom_height = Some(custom_height);
            }
            if let Some(border) = &patch.border {
                image.border = border.clone();
            }
            Ok(())
        }
        (Component::Options(options), ComponentPatch::Options(patch)) => {
            if let Some(text) = &patch.text {
                options.text = text.clone();
            }
            if let Some(items) = &patch.options {
                options.options = items.clone();
            }
            if let Some(size) = patch.size {
                options.size = size;
            }
            if let Some(color) = &patch.color {
                options.color = color.clone();
            }
            if let Some(border) = &patch.border {
                options.border = border.clone();
            }
            Ok(())
        }
        (component, _) => Err(AppError::ValidationError(format!(
            "Patch variant does not match component '{}'",
            component.id()
        ))),
    }
}

pub fn remove_component(quiz: &Quiz, step_id: &str, component_id: &str) -> AppResult<Quiz> {
    let mut next = quiz.clone();
    let step = next
        .steps
        .iter_mut()
        .find(|s| s.id == step_id)
        .ok_or_else(|| AppError::NotFound(format!("Step with id '{}' not found", step_id)))?;

    let before = step.components.len();
    step.components.retain(|c| c.id() != component_id);
    if step.components.len() == before {
        return Err(AppError::NotFound(format!(
            "Component with id '{}' not found",
            component_id
        )));
    }

    Ok(next)
}

/// Stable move: the component is removed from `from_index` and reinserted at
/// `to_index`, shifting the elements in between by one.
pub fn reorder_components(
    quiz: &Quiz,
    step_id: &str,
    from_index: usize,
    to_index: usize,
) -> AppResult<Quiz> {
    let mut next = quiz.clone();
    let step = next
        .steps
        .iter_mut()
        .find(|s| s.id == step_id)
        .ok_or_else(|| AppError::NotFound(format!("Step with id '{}' not found", step_id)))?;

    let len = step.components.len();
    if from_index >= len || to_index >= len {
        return Err(AppError::ValidationError(format!(
            "Reorder indices ({}, {}) out of bounds for {} components",
            from_index, to_index, len
        )));
    }

    let component = step.components.remove(from_index);
    step.components.insert(to_index, component);

    Ok(next)
}

/// Shallow-merges the settings patch.
pub fn update_settings(quiz: &Quiz, patch: &UpdateSettingsRequest) -> Quiz {
    let mut next = quiz.clone();
    if let Some(background_color) = &patch.background_color {
        next.settings.background_color = background_color.clone();
    }
    if let Some(show_branding) = patch.show_branding {
        next.settings.show_branding = show_branding;
    }
    if let Some(font_family) = &patch.font_family {
        next.settings.font_family = font_family.clone();
    }
    next
}

/// Deep copy with fresh ids everywhere and internal navigation references
/// remapped onto the new step ids. References that were already dangling are
/// left as they were.
pub fn duplicate_quiz(quiz: &Quiz) -> Quiz {
    let mut copy = quiz.clone();
    copy.id = Uuid::new_v4().to_string();
    copy.title = format!("{} (cópia)", quiz.title);
    copy.favorite = false;
    copy.created_at = chrono::Utc::now();
    copy.updated_at = copy.created_at;

    let id_map: std::collections::HashMap<String, String> = copy
        .steps
        .iter()
        .map(|step| (step.id.clone(), Uuid::new_v4().to_string()))
        .collect();

    for step in &mut copy.steps {
        step.id = id_map[&step.id].clone();
        for component in &mut step.components {
            remap_component(component, &id_map);
        }
    }

    copy
}

fn remap_component(
    component: &mut Component,
    id_map: &std::collections::HashMap<String, String>,
) {
    let fresh = Uuid::new_v4().to_string();
    match component {
        Component::Button(button) => {
            button.id = fresh;
            if let ButtonAction::GoToStep { step_id } = &mut button.action {
                if let Some(mapped) = id_map.get(step_id) {
                    *step_id = mapped.clone();
                }
            }
        }
        Component::Text(text) => text.id = fresh,
        Component::Image(image) => image.id = fresh,
        Component::Options(options) => {
            options.id = fresh;
            for option in &mut options.options {
                option.id = Uuid::new_v4().to_string();
                if let Some(next_step_id) = &mut option.next_step_id {
                    if let Some(mapped) = id_map.get(next_step_id) {
                        *next_step_id = mapped.clone();
                    }
                }
            }
        }
        Component::Generic(generic) => generic.id = fresh,
    }
}

/// Every step id the quiz navigates to: option links plus `GoToStep`
/// button targets.
pub fn collect_step_references(quiz: &Quiz) -> Vec<String> {
    let mut references = Vec::new();
    for step in &quiz.steps {
        for component in &step.components {
            match component {
                Component::Options(options) => {
                    references.extend(
                        options
                            .options
                            .iter()
                            .filter_map(|o| o.next_step_id.clone()),
                    );
                }
                Component::Button(button) => {
                    if let ButtonAction::GoToStep { step_id } = &button.action {
                        references.push(step_id.clone());
                    }
                }
                Component::Text(_) | Component::Image(_) | Component::Generic(_) => {}
            }
        }
    }
    references
}
