//! Browser bindings for the two pages
//!
//! Both pages bind to elements by id in `index.html`; a page whose root
//! element is missing is skipped. Handlers live for the page lifetime
//! (`Closure::forget`).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement};

use crate::config::AppConfig;
use crate::consts::SHAPE_COUNT;
use crate::crud::{CrudPage, Submitted};
use crate::form::{FormField, PersonForm};
use crate::person::Nationality;
use crate::platform;
use crate::shapes::{Direction, ShapeArrangement, ShapeKind};
use crate::table::{display_name, display_phone, gender_badge};

const ALL_FIELDS: [FormField; 11] = [
    FormField::Title,
    FormField::FirstName,
    FormField::LastName,
    FormField::Birthday,
    FormField::Nationality,
    FormField::CitizenId,
    FormField::Gender,
    FormField::PhoneCode,
    FormField::Phone,
    FormField::PassportNo,
    FormField::Salary,
];

/// Set up logging, read config and mount whichever pages are present
pub fn run() -> Result<(), JsValue> {
    let storage = platform::durable_storage();
    let config = AppConfig::load(storage.as_ref());
    platform::init_logging(platform::parse_level(&config.log_level));
    log::info!("Shape CRUD starting...");

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.get_element_by_id("shape-grid").is_some() {
        mount_shapes(&document)?;
    }
    if document.get_element_by_id("persons-body").is_some() {
        mount_crud(&document, storage, &config)?;
    }

    log::info!("Shape CRUD running!");
    Ok(())
}

fn on_click(
    document: &Document,
    id: &str,
    handler: impl FnMut(web_sys::MouseEvent) + 'static,
) -> Result<(), JsValue> {
    if let Some(el) = document.get_element_by_id(id) {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    } else {
        log::warn!("Missing #{} element", id);
    }
    Ok(())
}

// === Shapes page ===

fn mount_shapes(document: &Document) -> Result<(), JsValue> {
    let seed = js_sys::Date::now() as u64;
    let mut arrangement = ShapeArrangement::new(seed);

    // Re-render straight from change notifications
    {
        let document = document.clone();
        arrangement.subscribe(move |shapes| render_shapes(&document, shapes));
    }
    render_shapes(document, &crate::shapes::INITIAL_SHAPES);

    let arrangement = Rc::new(RefCell::new(arrangement));

    {
        let arrangement = arrangement.clone();
        on_click(document, "move-left", move |_| {
            arrangement.borrow_mut().rotate(Direction::Left)
        })?;
    }
    {
        let arrangement = arrangement.clone();
        on_click(document, "move-right", move |_| {
            arrangement.borrow_mut().rotate(Direction::Right)
        })?;
    }
    {
        let arrangement = arrangement.clone();
        on_click(document, "swap-halves", move |_| {
            arrangement.borrow_mut().swap_halves()
        })?;
    }
    // Clicking a shape shuffles the grid; gaps between cells do not
    on_click(document, "shape-grid", move |event| {
        let on_cell = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(".shape-cell").ok().flatten())
            .is_some();
        if on_cell {
            arrangement.borrow_mut().shuffle();
        }
    })?;

    log::info!("Shapes page mounted with seed: {}", seed);
    Ok(())
}

fn render_shapes(document: &Document, shapes: &[ShapeKind; SHAPE_COUNT]) {
    if let Some(grid) = document.get_element_by_id("shape-grid") {
        let html: String = shapes
            .iter()
            .map(|s| format!(r#"<div class="shape-cell"><div class="{}"></div></div>"#, s.as_str()))
            .collect();
        grid.set_inner_html(&html);
    }
}

// === CRUD page ===

fn mount_crud(
    doc: &Document,
    storage: Box<dyn crate::storage::KeyValueStorage>,
    config: &AppConfig,
) -> Result<(), JsValue> {
    let mut page = CrudPage::with_storage(storage, config);

    // Store transitions mark the view stale; handlers re-render afterwards
    let dirty = Rc::new(Cell::new(true));
    {
        let dirty = dirty.clone();
        page.store_mut().subscribe(move |_| dirty.set(true));
    }
    page.mount();

    let page = Rc::new(RefCell::new(page));
    fill_selects(doc);
    write_form(doc, page.borrow().form());
    refresh(doc, &page.borrow(), &dirty, false);

    {
        let (page, dirty, document) = (page.clone(), dirty.clone(), doc.clone());
        on_click(doc, "submit-btn", move |event| {
            event.prevent_default();
            let mut p = page.borrow_mut();
            read_form(&document, p.form_mut());
            match p.submit() {
                Ok(Submitted::Added(id)) => log::info!("Added person {}", id),
                Ok(Submitted::Updated(id)) => log::info!("Updated person {}", id),
                Ok(Submitted::Missing(id)) => log::warn!("Person {} was deleted while editing", id),
                Err(err) => {
                    show_error(&document, Some(&err.to_string()));
                    return;
                }
            }
            show_error(&document, None);
            write_form(&document, p.form());
            refresh(&document, &p, &dirty, false);
        })?;
    }

    // Reset button doubles as cancel while editing
    {
        let (page, dirty, document) = (page.clone(), dirty.clone(), doc.clone());
        on_click(doc, "reset-btn", move |event| {
            event.prevent_default();
            let mut p = page.borrow_mut();
            if p.is_editing() {
                p.cancel_edit();
            } else {
                p.reset_form();
            }
            show_error(&document, None);
            write_form(&document, p.form());
            refresh(&document, &p, &dirty, false);
        })?;
    }

    {
        let (page, dirty, document) = (page.clone(), dirty.clone(), doc.clone());
        on_click(doc, "delete-selected-btn", move |_| {
            let count = page.borrow().selection().len();
            if !confirm(&format!("Delete selected ({})?", count)) {
                return;
            }
            let mut p = page.borrow_mut();
            p.delete_selected();
            // Selection cleared even if nothing was deleted
            refresh(&document, &p, &dirty, true);
        })?;
    }

    {
        let (page, dirty, document) = (page.clone(), dirty.clone(), doc.clone());
        on_click(doc, "prev-page", move |_| {
            let mut p = page.borrow_mut();
            p.prev_page();
            refresh(&document, &p, &dirty, true);
        })?;
    }

    {
        let (page, dirty, document) = (page.clone(), dirty.clone(), doc.clone());
        on_click(doc, "next-page", move |_| {
            let mut p = page.borrow_mut();
            p.next_page();
            refresh(&document, &p, &dirty, true);
        })?;
    }

    {
        let (page, dirty, document) = (page.clone(), dirty.clone(), doc.clone());
        on_click(doc, "select-page", move |event| {
            let checked = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.checked())
                .unwrap_or(false);
            let mut p = page.borrow_mut();
            p.toggle_page(checked);
            refresh(&document, &p, &dirty, true);
        })?;
    }

    // Row actions are delegated from the table body
    {
        let document = doc.clone();
        on_click(doc, "persons-body", move |event| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("[data-action]").ok().flatten())
            else {
                return;
            };
            let action = target.get_attribute("data-action").unwrap_or_default();
            let id = target.get_attribute("data-id").unwrap_or_default();

            let mut p = page.borrow_mut();
            let view_changed = match action.as_str() {
                "edit" => {
                    if p.edit(&id) {
                        write_form(&document, p.form());
                    }
                    false
                }
                "delete" => {
                    if !confirm("Delete?") {
                        return;
                    }
                    p.delete(&id);
                    false
                }
                "select" => {
                    let checked = target
                        .dyn_ref::<HtmlInputElement>()
                        .map(|input| input.checked())
                        .unwrap_or(false);
                    p.toggle_row(&id, checked);
                    true
                }
                other => {
                    log::warn!("Unknown row action {:?}", other);
                    false
                }
            };
            refresh(&document, &p, &dirty, view_changed);
        })?;
    }

    log::info!("CRUD page mounted");
    Ok(())
}

/// Re-render when the store changed or the table view itself moved
fn refresh(document: &Document, page: &CrudPage, dirty: &Cell<bool>, view_changed: bool) {
    if dirty.replace(false) || view_changed {
        render_crud(document, page);
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn field_value(document: &Document, field: FormField) -> Option<String> {
    let el = document.get_element_by_id(field.name())?;
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    el.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
}

fn set_field_value(document: &Document, field: FormField, value: &str) {
    let Some(el) = document.get_element_by_id(field.name()) else {
        return;
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    }
}

/// Build the `<option>` lists of the select fields
fn fill_selects(document: &Document) {
    for field in ALL_FIELDS {
        let (Some(options), Some(select)) = (field.options(), document.get_element_by_id(field.name()))
        else {
            continue;
        };
        let html: String = options
            .iter()
            .map(|(value, label)| format!(r#"<option value="{}">{}</option>"#, escape(value), escape(label)))
            .collect();
        select.set_inner_html(&html);
    }
}

fn read_form(document: &Document, form: &mut PersonForm) {
    for field in ALL_FIELDS {
        if let Some(value) = field_value(document, field) {
            form.set_field(field, value);
        }
    }
}

fn write_form(document: &Document, form: &PersonForm) {
    for field in ALL_FIELDS {
        set_field_value(document, field, form.field(field));
    }
}

fn show_error(document: &Document, message: Option<&str>) {
    if let Some(el) = document.get_element_by_id("form-error") {
        el.set_text_content(message);
        let _ = el.set_attribute("class", if message.is_some() { "" } else { "hidden" });
    }
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn set_disabled(document: &Document, id: &str, disabled: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = if disabled {
            el.set_attribute("disabled", "")
        } else {
            el.remove_attribute("disabled")
        };
    }
}

fn set_hidden(document: &Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
    }
}

/// Minimal HTML escaping for text placed into `innerHTML`
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_crud(document: &Document, page: &CrudPage) {
    let rows = page.rows();
    let body = if rows.is_empty() {
        r#"<tr><td colspan="6" class="no-data">No data</td></tr>"#.to_string()
    } else {
        rows.iter()
            .map(|person| {
                let id = escape(&person.id);
                let checked = if page.selection().contains(&person.id) {
                    " checked"
                } else {
                    ""
                };
                let (gender, badge) = gender_badge(person);
                let nationality = Nationality::from_str(&person.nationality)
                    .map(|n| n.label().to_string())
                    .unwrap_or_else(|| person.nationality.clone());
                format!(
                    concat!(
                        r#"<tr><td class="checkbox-cell"><input type="checkbox" data-action="select" data-id="{id}"{checked}></td>"#,
                        r#"<td><div class="text-teal">{name}</div></td>"#,
                        r#"<td><span class="{badge}">{gender}</span></td>"#,
                        r#"<td>{phone}</td><td>{nationality}</td>"#,
                        r#"<td><button data-action="edit" data-id="{id}">Edit</button>"#,
                        r#"<button class="danger" data-action="delete" data-id="{id}">Delete</button></td></tr>"#,
                    ),
                    id = id,
                    checked = checked,
                    name = escape(&display_name(person)),
                    badge = badge.class(),
                    gender = gender,
                    phone = escape(&display_phone(person)),
                    nationality = escape(&nationality),
                )
            })
            .collect()
    };
    if let Some(tbody) = document.get_element_by_id("persons-body") {
        tbody.set_inner_html(&body);
    }

    if let Some(header) = document
        .get_element_by_id("select-page")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        header.set_checked(page.page_all_checked());
    }

    let total = page.store().len();
    set_hidden(document, "pagination", total == 0);
    set_text(document, "page-label", &page.page_label());
    set_disabled(document, "prev-page", !page.pagination().has_prev());
    set_disabled(document, "next-page", !page.pagination().has_next(total));

    let selected = page.selection().len();
    set_hidden(document, "delete-selected-btn", selected == 0);
    set_text(
        document,
        "delete-selected-btn",
        &format!("Delete selected ({})", selected),
    );

    let editing = page.is_editing();
    set_text(document, "submit-btn", if editing { "Update" } else { "Submit" });
    set_text(document, "reset-btn", if editing { "Cancel" } else { "Reset" });
}
