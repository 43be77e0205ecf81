// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving a recycled grid the way a host toolkit would.
//!
//! This example shows how to:
//! - back element cells with a host visual through `ElementFactory`,
//! - assign, add, and remove records while the pool stays the same size,
//! - scroll directly and with the damped `move_to_index` animation,
//! - route a click on a visible cell back to its record.
//!
//! The `understory_examples` package lives in the `demos/` directory of the
//! workspace rather than `examples/`.
//!
//! Run:
//! - `cargo run -p understory_examples --example recycler_grid`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Size;
use understory_recycler::{ElementFactory, ElementVisual, GridLayout, RecyclerView, ScrollAxis};

/// One row of sample data.
#[derive(Clone, Debug, PartialEq)]
struct Item {
    id: u32,
    name: String,
}

/// Stand-in for a toolkit widget: remembers what it was last told to show.
#[derive(Debug, Default)]
struct Tile {
    serial: usize,
    caption: String,
    shown: bool,
}

impl ElementVisual<Item> for Tile {
    fn refresh(&mut self, record: &Item) {
        self.caption = format!("#{} {}", record.id, record.name);
    }

    fn set_visible(&mut self, visible: bool) {
        self.shown = visible;
    }
}

#[derive(Debug, Default)]
struct Tiles {
    created: usize,
    destroyed: usize,
}

impl ElementFactory<Item> for Tiles {
    type Element = Tile;

    fn create_element(&mut self) -> Tile {
        self.created += 1;
        Tile {
            serial: self.created,
            caption: String::new(),
            shown: true,
        }
    }

    fn destroy_element(&mut self, _element: Tile) {
        self.destroyed += 1;
    }
}

fn item(id: u32) -> Item {
    Item {
        id,
        name: format!("item {id}"),
    }
}

fn print_visible(view: &RecyclerView<Item, Tiles>, label: &str) {
    let Some(lines) = view.visible_lines() else {
        println!("{label}: nothing visible");
        return;
    };
    println!(
        "{label}: offset {:.1}, normalized {:.4}, lines {lines:?}",
        view.scroll_offset(),
        view.normalized_position()
    );
    for line in lines {
        let slot = line % view.pool_capacity();
        let Some(container) = view.container(slot) else {
            continue;
        };
        let captions: Vec<_> = container
            .cells()
            .iter()
            .filter(|cell| cell.visual().shown)
            .map(|cell| format!("{}@{}", cell.visual().caption, cell.visual().serial))
            .collect();
        println!(
            "  line {line:>3} in slot {slot} at {:?}: {}",
            container.origin(),
            captions.join(", ")
        );
    }
}

fn main() {
    let layout = GridLayout::default()
        .with_element_size(Size::new(100.0, 100.0))
        .with_element_spacing(5.0)
        .with_line_spacing(10.0);
    let mut view = RecyclerView::new(
        ScrollAxis::Vertical,
        layout,
        Size::new(320.0, 500.0),
        Tiles::default(),
    );

    let clicked = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&clicked);
    view.set_click_callback(move |record: &Item| sink.borrow_mut().push(record.id));

    view.assign_data((0..1_000).map(item).collect());
    view.refresh();
    println!(
        "{} records, {} per line, {} lines, pool of {} containers, content {:?}",
        view.records().len(),
        view.elements_per_line(),
        view.line_count(),
        view.pool_capacity(),
        view.content_size()
    );
    print_visible(&view, "initial");

    view.add_record(item(1_000));
    let removed = view.remove_record(&item(0));
    view.refresh();
    println!("added #1000, removed {:?}", removed.map(|r| r.id));
    print_visible(&view, "after edit");

    view.scroll_by(1_234.0);
    print_visible(&view, "scrolled");

    view.move_to_index(500, true);
    print_visible(&view, "jumped to #500");

    view.move_to_index(999, false);
    let mut frames = 0;
    while view.tick() {
        frames += 1;
    }
    println!("animated to the end in {frames} frames");
    print_visible(&view, "animated");

    if let Some((slot, offset)) = view.slot_for_index(990) {
        view.click(slot, offset);
    }
    println!("clicked records: {:?}", clicked.borrow());

    let factory = view.factory();
    println!(
        "visuals created: {}, destroyed: {}",
        factory.created, factory.destroyed
    );
}
