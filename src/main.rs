//! Shape CRUD entry point
//!
//! On the web this mounts the pages into `index.html`. Natively it runs a
//! short scripted session against in-memory storage and logs the results.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    shape_crud::web::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use shape_crud::platform;

    let storage = platform::durable_storage();
    let config = shape_crud::AppConfig::load(storage.as_ref());
    platform::init_logging(platform::parse_level(&config.log_level));
    log::info!("Shape CRUD (native) starting...");
    log::info!("Native mode keeps data in memory - run with `trunk serve` for the web version");

    demo_shapes(platform::now_ms() as u64);
    demo_crud(storage, &config);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_shapes(seed: u64) {
    use shape_crud::{Direction, ShapeArrangement};

    let mut grid = ShapeArrangement::new(seed);
    grid.subscribe(|shapes| {
        let names: Vec<_> = shapes.iter().map(|s| s.as_str()).collect();
        log::info!("Grid: {}", names.join(" "));
    });

    grid.rotate(Direction::Left);
    grid.rotate(Direction::Right);
    grid.swap_halves();
    grid.shuffle();
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_crud(storage: Box<dyn shape_crud::KeyValueStorage>, config: &shape_crud::AppConfig) {
    use shape_crud::table::display_name;
    use shape_crud::{CrudPage, Gender, Nationality, Title};

    let mut page = CrudPage::with_storage(storage, config);
    page.store_mut().subscribe(|state| {
        log::info!(
            "Store: {} persons, editing {:?}",
            state.persons.len(),
            state.editing_person.as_ref().map(|p| p.id.as_str())
        );
    });
    page.mount();

    let people = [
        ("Ann", "Lee", Title::Ms, Gender::Female, Nationality::Thai),
        ("Bo", "Kim", Title::Mr, Gender::Male, Nationality::Korean),
        ("Chloe", "Martin", Title::Mrs, Gender::Female, Nationality::French),
    ];
    for (first, last, title, gender, nationality) in people {
        let form = page.form_mut();
        form.first_name = first.to_string();
        form.last_name = last.to_string();
        form.title = title.as_str().to_string();
        form.gender = gender.as_str().to_string();
        form.nationality = nationality.as_str().to_string();
        form.salary = "45,000".to_string();
        if let Err(err) = page.submit() {
            log::error!("Submit failed: {}", err);
        }
    }

    // An empty submit is rejected by validation
    if let Err(err) = page.submit() {
        log::info!("Rejected: {}", err);
    }

    if let Some(id) = page.store().persons().first().map(|p| p.id.clone()) {
        page.edit(&id);
        page.form_mut().last_name = "Smith".to_string();
        if let Err(err) = page.submit() {
            log::error!("Update failed: {}", err);
        }
        page.toggle_row(&id, true);
        page.delete_selected();
    }

    for person in page.rows() {
        log::info!("Row: {}", display_name(person));
    }
    log::info!("{}", page.page_label());
}
