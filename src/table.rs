//! Person table state: pagination, row selection and cell formatting

use crate::consts::DEFAULT_PAGE_SIZE;
use crate::person::{Gender, Person};

/// 1-based page cursor over a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    current: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Page size 0 is treated as 1
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// `ceil(len / page_size)`; 0 for an empty list
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Rows of the current page (empty past the end)
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = ((self.current - 1) * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.current < self.total_pages(len)
    }

    pub fn prev(&mut self) {
        if self.has_prev() {
            self.current -= 1;
        }
    }

    pub fn next(&mut self, len: usize) {
        if self.has_next(len) {
            self.current += 1;
        }
    }

    /// Pull the cursor back onto the last page after rows disappear
    pub fn clamp(&mut self, len: usize) {
        self.current = self.current.min(self.total_pages(len)).max(1);
    }

    /// `"Page X of Y"`
    pub fn label(&self, len: usize) -> String {
        format!("Page {} of {}", self.current, self.total_pages(len))
    }
}

/// Checked row ids, in the order they were checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Row checkbox
    pub fn toggle(&mut self, id: &str, checked: bool) {
        if checked {
            if !self.contains(id) {
                self.ids.push(id.to_string());
            }
        } else {
            self.ids.retain(|s| s != id);
        }
    }

    /// Header checkbox: select exactly the visible page, or nothing
    pub fn set_all(&mut self, page: &[Person], checked: bool) {
        self.ids = if checked {
            page.iter().map(|p| p.id.clone()).collect()
        } else {
            Vec::new()
        };
    }

    /// Header checkbox state
    pub fn all_checked(&self, page: &[Person]) -> bool {
        !page.is_empty() && page.iter().all(|p| self.contains(&p.id))
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer exist in the collection
    pub fn retain_existing(&mut self, persons: &[Person]) {
        self.ids.retain(|id| persons.iter().any(|p| &p.id == id));
    }
}

/// Badge color of the gender cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Blue,
    Purple,
    Gray,
}

impl Badge {
    /// CSS class
    pub fn class(&self) -> &'static str {
        match self {
            Badge::Blue => "badge badge-blue",
            Badge::Purple => "badge badge-purple",
            Badge::Gray => "badge badge-gray",
        }
    }
}

/// `"mr Ann Lee"`
pub fn display_name(person: &Person) -> String {
    format!("{} {} {}", person.title, person.first_name, person.last_name)
}

/// `"+66 0812345678"`, or `"-"` without a phone
pub fn display_phone(person: &Person) -> String {
    if person.phone.is_empty() {
        "-".to_string()
    } else {
        format!("{} {}", person.phone_code, person.phone)
    }
}

/// Gender label and badge; unknown values show as unspecified
pub fn gender_badge(person: &Person) -> (&'static str, Badge) {
    match Gender::from_str(&person.gender) {
        Some(Gender::Male) => (Gender::Male.label(), Badge::Blue),
        Some(Gender::Female) => (Gender::Female.label(), Badge::Purple),
        _ => (Gender::Unspecified.label(), Badge::Gray),
    }
}
