//! Table view state: column sort and pagination over published rows
//!
//! Rows arrive in document order. Sorting is stable, so ties (and a cleared
//! sort) keep that order.

use shared::{NetWeight, PaginatedResponse, ProductRow, SortDirection};
use std::cmp::Ordering;

/// Page sizes offered by the paginator
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 20, 50];

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Image,
    Name,
    Subcategory,
    Price,
    NetWeight,
    Supermarket,
}

impl Column {
    /// Columns shown for a single supermarket
    pub const DISPLAYED: [Column; 5] = [
        Column::Image,
        Column::Name,
        Column::Subcategory,
        Column::Price,
        Column::NetWeight,
    ];

    /// Columns shown when every supermarket is listed
    pub const DISPLAYED_ALL_SUPERMARKETS: [Column; 6] = [
        Column::Image,
        Column::Name,
        Column::Subcategory,
        Column::Price,
        Column::NetWeight,
        Column::Supermarket,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Image => "Image",
            Column::Name => "Name",
            Column::Subcategory => "Subcategory",
            Column::Price => "Price",
            Column::NetWeight => "Net Weight",
            Column::Supermarket => "Supermarket",
        }
    }

    pub fn is_sortable(self) -> bool {
        self != Column::Image
    }

    /// Display text for this column of `row`
    pub fn cell(self, row: &ProductRow) -> String {
        match self {
            Column::Image => row.image.clone().unwrap_or_default(),
            Column::Name => row.name.clone(),
            Column::Subcategory => row.subcategory.clone(),
            Column::Price => format_price(row.price),
            Column::NetWeight => row.net_weight.as_ref().map(format_net_weight).unwrap_or_default(),
            Column::Supermarket => row.supermarket.clone(),
        }
    }

    fn compare(self, a: &ProductRow, b: &ProductRow) -> Ordering {
        match self {
            Column::Image => Ordering::Equal,
            Column::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Column::Subcategory => a.subcategory.cmp(&b.subcategory),
            Column::Price => a.price.cmp(&b.price),
            Column::NetWeight => compare_net_weight(a.net_weight.as_ref(), b.net_weight.as_ref()),
            Column::Supermarket => a.supermarket.cmp(&b.supermarket),
        }
    }
}

/// Missing weights sort first; otherwise by unit, then magnitude.
fn compare_net_weight(a: Option<&NetWeight>, b: Option<&NetWeight>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.u.cmp(&b.u).then_with(|| a.t.total_cmp(&b.t)),
    }
}

/// Format pence as pounds (`120` → `£1.20`)
pub fn format_price(pence: i64) -> String {
    let sign = if pence < 0 { "-" } else { "" };
    let abs = pence.unsigned_abs();
    format!("{sign}£{}.{:02}", abs / 100, abs % 100)
}

/// Format a net weight (`{t: 250, u: "g"}` → `250 g`)
pub fn format_net_weight(nw: &NetWeight) -> String {
    if nw.t.fract() == 0.0 && nw.t.abs() < 1e15 {
        format!("{} {}", nw.t as i64, nw.u)
    } else {
        format!("{} {}", nw.t, nw.u)
    }
}

/// Sort and page state for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    sort: Option<(Column, SortDirection)>,
    /// Zero-based
    page_index: u32,
    page_size: u32,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableView {
    pub fn new(page_size: u32) -> Self {
        Self {
            sort: None,
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn sort(&self) -> Option<(Column, SortDirection)> {
        self.sort
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Cycle the sort on `column`: ascending, descending, then cleared.
    pub fn sort_by(&mut self, column: Column) {
        if !column.is_sortable() {
            return;
        }
        self.sort = match self.sort {
            Some((c, SortDirection::Asc)) if c == column => Some((column, SortDirection::Desc)),
            Some((c, SortDirection::Desc)) if c == column => None,
            _ => Some((column, SortDirection::Asc)),
        };
        self.page_index = 0;
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    /// Step to the next entry of [`PAGE_SIZE_OPTIONS`], wrapping around.
    pub fn cycle_page_size(&mut self) {
        let next = PAGE_SIZE_OPTIONS
            .iter()
            .copied()
            .find(|&size| size > self.page_size)
            .unwrap_or(PAGE_SIZE_OPTIONS[0]);
        self.set_page_size(next);
    }

    pub fn total_pages(&self, total_rows: usize) -> u32 {
        (total_rows as u64).div_ceil(self.page_size as u64).max(1) as u32
    }

    pub fn next_page(&mut self, total_rows: usize) {
        if self.page_index + 1 < self.total_pages(total_rows) {
            self.page_index += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Back to the first page; called when a new row set arrives.
    pub fn reset_page(&mut self) {
        self.page_index = 0;
    }

    /// Rows in display order
    pub fn sorted<'a>(&self, rows: &'a [ProductRow]) -> Vec<&'a ProductRow> {
        let mut sorted: Vec<&ProductRow> = rows.iter().collect();
        if let Some((column, direction)) = self.sort {
            sorted.sort_by(|a, b| {
                let ord = column.compare(a, b);
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        sorted
    }

    /// The current page. A page index past the end is clamped to the last page.
    pub fn page<'a>(&self, rows: &'a [ProductRow]) -> PaginatedResponse<&'a ProductRow> {
        let total_pages = self.total_pages(rows.len());
        let page_index = self.page_index.min(total_pages - 1);
        let start = (page_index * self.page_size) as usize;

        let data: Vec<&ProductRow> = self
            .sorted(rows)
            .into_iter()
            .skip(start)
            .take(self.page_size as usize)
            .collect();

        let mut page = PaginatedResponse::new(data, rows.len() as u64, page_index + 1, self.page_size);
        // An empty listing still shows one (empty) page
        page.total_pages = total_pages;
        page
    }
}
