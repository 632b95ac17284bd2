//! The engine instance for one enhanced table.
//!
//! `EnhancedTable` owns the host element (whose content holds the managed
//! table), the component's own markup, and every piece of per-table state.
//! Hosts feed it [`Event`]s and drive its timers with [`EnhancedTable::tick`];
//! observable changes are queued as [`TableEvent`]s.

use std::time::Instant;

use celldom::element::{closest, find_element, find_element_mut, find_first, path_to};
use celldom::{
    Element, Event, KeyEvent, LayoutResult, Rect, Size, StyleRule, Tag, TimerId, TimerQueue,
    hit_test, hit_test_any, measure,
};
use uuid::Uuid;

use crate::annotate::{COL_ATTR, PROCESSED_CLASS, SORT_BUTTON_CLASS, SortIndex, annotate};
use crate::config::TableConfig;
use crate::document::Document;
use crate::error::TableError;
use crate::events::{EventResult, TableEvent};
use crate::fullscreen::{FullscreenController, Surfaces};
use crate::hover::{CellCoord, HoverEngine};
use crate::listeners::{ListenerId, ListenerKind, ListenerTarget, Listeners};
use crate::markup::{self, CLOSE_BUTTON_ID, OPEN_BUTTON_ID, SLOT_ID, WRAPPER_ID};
use crate::sort::{SortDirection, SortState, sort_table};
use crate::visibility::{Debouncer, is_overflowing, set_open_affordance};

/// Tag name of a host created by [`EnhancedTable::host_element`].
pub const HOST_TAG: &str = "gridwise-table";

const UID_LEN: usize = 7;

/// Payloads carried by the engine's timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerTask {
    /// Recurring check that `cell_id` is still under the pointer.
    HoverPoll { cell_id: String },
    /// Debounced re-evaluation of the overflow gate.
    OverflowCheck,
}

#[derive(Debug, Default)]
struct Bindings {
    resize: Option<ListenerId>,
    pointer: Option<ListenerId>,
    click: Option<ListenerId>,
}

#[derive(Debug)]
pub struct EnhancedTable {
    config: TableConfig,
    uid: String,

    host: Element,
    shadow: Element,
    document: Document,
    table_id: Option<String>,

    sort_index: Option<SortIndex>,
    sort_state: SortState,
    hover: HoverEngine,
    fullscreen: FullscreenController,
    overflow_check: Debouncer,

    listeners: Listeners,
    bindings: Bindings,
    timers: TimerQueue<TimerTask>,

    viewport: Rect,
    /// Element currently under the pointer.
    hovered: Option<String>,
    events: Vec<TableEvent>,
    mounted: bool,
}

impl EnhancedTable {
    /// An empty host with no id, to be given `table--{uid}` on construction.
    pub fn host_element() -> Element {
        Element::new(Tag::Other(HOST_TAG.to_string())).id("")
    }

    /// Adopt `host` and the first table found in its content.
    pub fn new(config: TableConfig, mut host: Element, document: Document) -> Self {
        let uid: String = Uuid::new_v4().simple().to_string().chars().take(UID_LEN).collect();

        host.set_data("id", uid.clone());
        if host.id.is_empty() {
            host.id = format!("table--{uid}");
        }
        if let Some(sortable) = config.sortable.to_attribute() {
            host.set_data("sortable", sortable);
        }

        let table_id = find_first(&host, &|el| el.tag == Tag::Table).map(|t| t.id.clone());
        let hover = HoverEngine::new(
            host.id.clone(),
            &uid,
            config.highlight,
            config.hover_poll_interval,
        );
        let overflow_check = Debouncer::new(config.resize_debounce);

        log::debug!(
            "[table] new host={} uid={uid} table={:?}",
            host.id,
            table_id
        );

        Self {
            config,
            uid,
            host,
            shadow: markup::render(),
            document,
            table_id,
            sort_index: None,
            sort_state: SortState::default(),
            hover,
            fullscreen: FullscreenController::new(),
            overflow_check,
            listeners: Listeners::new(),
            bindings: Bindings::default(),
            timers: TimerQueue::new(),
            viewport: Rect::from_size(80, 24),
            hovered: None,
            events: Vec::new(),
            mounted: false,
        }
    }

    /// Manage `table` instead of whatever the host content holds. Replaces an
    /// adopted table in place, otherwise appends to the host.
    pub fn with_table(mut self, table: Element) -> Self {
        let id = table.id.clone();
        match self
            .table_id
            .as_deref()
            .and_then(|current| find_element_mut(&mut self.host, current))
        {
            Some(current) => *current = table,
            None => self.host.push_child(table),
        }
        self.table_id = Some(id);
        self
    }

    pub fn with_viewport(mut self, width: u16, height: u16) -> Self {
        self.viewport = Rect::from_size(width, height);
        self
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Attach listeners, annotate the table and run the first overflow check.
    pub fn mount(&mut self) -> Result<(), TableError> {
        if self.table_id.is_none() {
            log::error!("[table] host={} has no table to manage", self.host.id);
            return Err(TableError::NoTable);
        }
        if self.config.fullscreen {
            self.listeners.bind(
                &mut self.bindings.resize,
                ListenerTarget::Window,
                ListenerKind::Resize,
            );
        }
        self.process();
        self.mounted = true;
        Ok(())
    }

    /// Annotate the table once. Returns false if it was already processed or
    /// there is no table.
    pub fn process(&mut self) -> bool {
        if self.host.has_class(PROCESSED_CLASS) {
            log::trace!("[table] host={} already processed", self.host.id);
            return false;
        }
        let Some(table_id) = self.table_id.as_deref() else {
            return false;
        };
        let Some(table) = find_element_mut(&mut self.host, table_id) else {
            log::warn!("[table] table {table_id} left the host");
            return false;
        };

        let annotated = annotate(table, &self.config.sortable);
        *table = annotated.table;
        self.sort_index = annotated.sort_index;

        self.listeners.bind(
            &mut self.bindings.pointer,
            ListenerTarget::Table,
            ListenerKind::PointerMove,
        );
        if self.config.sortable.is_enabled() {
            self.listeners.bind(
                &mut self.bindings.click,
                ListenerTarget::Table,
                ListenerKind::Click,
            );
        }
        if self.config.fullscreen {
            self.check_overflow();
        }
        self.host.add_class(PROCESSED_CLASS);
        true
    }

    /// Cancel every timer and remove every listener. Leaves fullscreen first
    /// so the document root is not left marked.
    pub fn teardown(&mut self) {
        if self.hover.coordinates().is_some() {
            self.hover.clear(&mut self.host, &mut self.timers);
        }
        self.overflow_check.cancel(&mut self.timers);
        self.close_fullscreen();

        self.listeners.unbind(&mut self.bindings.resize);
        self.listeners.unbind(&mut self.bindings.pointer);
        self.listeners.unbind(&mut self.bindings.click);
        self.hovered = None;
        self.mounted = false;
        log::debug!(
            "[table] teardown host={} listeners={} timers={}",
            self.host.id,
            self.listeners.len(),
            self.timers.len()
        );
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Dispatch a host event. Events whose listener is not bound are ignored.
    pub fn handle_event(&mut self, event: &mut Event, now: Instant) -> Result<EventResult, TableError> {
        if !self.mounted {
            return Ok(EventResult::Ignored);
        }
        log::trace!("[table] event {event:?}");

        match event {
            Event::Resize { width, height } => {
                self.viewport = Rect::from_size(*width, *height);
                if self.bindings.resize.is_none() {
                    return Ok(EventResult::Ignored);
                }
                self.overflow_check
                    .trigger(&mut self.timers, now, TimerTask::OverflowCheck);
                Ok(EventResult::Consumed)
            }
            Event::Key(key) => Ok(if self.handle_key(key) {
                EventResult::Consumed
            } else {
                EventResult::Ignored
            }),
            Event::Click { target, x, y } => {
                let target = match target.clone() {
                    Some(target) => Some(target),
                    None => self.click_target(*x, *y),
                };
                match target {
                    Some(target) => self.handle_click(&target),
                    None => Ok(EventResult::Ignored),
                }
            }
            Event::PointerMove { target, x, y } => {
                let target = match target.clone() {
                    Some(target) => Some(target),
                    None => {
                        let layout = self.layout();
                        hit_test_any(&layout, &self.host, *x, *y)
                    }
                };
                self.hovered = target.clone();
                match target {
                    Some(target) => Ok(self.handle_pointer(&target, now)),
                    None => Ok(EventResult::Ignored),
                }
            }
            Event::PointerLeave => {
                self.hovered = None;
                Ok(EventResult::Ignored)
            }
        }
    }

    /// Window key handler. True if the press closed fullscreen.
    pub fn handle_key(&mut self, event: &mut KeyEvent) -> bool {
        if self.fullscreen.escape_listener().is_none() {
            return false;
        }
        log::trace!("[table] key {} host={}", event.key, self.host.id);
        if self.fullscreen.claim_escape(event) {
            return self.close_fullscreen();
        }
        false
    }

    fn handle_click(&mut self, target: &str) -> Result<EventResult, TableError> {
        let button = closest(&self.shadow, target, |el| el.tag == Tag::Button).map(|b| b.id.clone());
        if let Some(button) = button {
            // Hidden controls can't be activated.
            let hidden = path_to(&self.shadow, target).is_some_and(|path| path.iter().any(|el| el.hidden));
            if hidden {
                log::trace!("[table] click on hidden {button} ignored");
                return Ok(EventResult::Ignored);
            }
            let handled = match button.as_str() {
                OPEN_BUTTON_ID => self.open_fullscreen(),
                CLOSE_BUTTON_ID => self.close_fullscreen(),
                _ => false,
            };
            return Ok(if handled {
                EventResult::Consumed
            } else {
                EventResult::Ignored
            });
        }

        if self.bindings.click.is_none() {
            return Ok(EventResult::Ignored);
        }
        let Some(column) = self.sort_column_for(target) else {
            return Ok(EventResult::Ignored);
        };
        self.sort(column)?;
        Ok(EventResult::Consumed)
    }

    /// Column of the sort button containing `target`, if any.
    fn sort_column_for(&self, target: &str) -> Option<usize> {
        let table = find_element(&self.host, self.table_id.as_deref()?)?;
        let cell = closest(table, target, |el| el.tag.is_cell())?;
        if !cell.has_class(SORT_BUTTON_CLASS) {
            return None;
        }
        cell.get_data(COL_ATTR)?.parse().ok()
    }

    fn handle_pointer(&mut self, target: &str, now: Instant) -> EventResult {
        if self.bindings.pointer.is_none() {
            return EventResult::Ignored;
        }
        let Some(table_id) = self.table_id.as_deref() else {
            return EventResult::Ignored;
        };
        match self
            .hover
            .on_pointer(&mut self.host, table_id, target, &mut self.timers, now)
        {
            Some(coord) => {
                self.events.push(TableEvent::HighlightChanged(coord));
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    /// Fire every timer due at `now`. Returns how many fired.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some((id, task)) = self.timers.pop_due(now) {
            fired += 1;
            self.run_task(id, task);
        }
        fired
    }

    fn run_task(&mut self, id: TimerId, task: TimerTask) {
        match task {
            TimerTask::OverflowCheck => {
                if self.overflow_check.take_fired(id) {
                    self.check_overflow();
                }
            }
            TimerTask::HoverPoll { cell_id } => {
                let cleared = self.hover.check(
                    &mut self.host,
                    id,
                    &cell_id,
                    self.hovered.as_deref(),
                    &mut self.timers,
                );
                if cleared {
                    self.events.push(TableEvent::HighlightCleared);
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Sort the body by a 1-indexed column, toggling direction on repeat.
    pub fn sort(&mut self, column: usize) -> Result<SortDirection, TableError> {
        let Some(index) = self.sort_index.as_mut() else {
            log::error!("[table] sort requested before annotation");
            return Err(TableError::NotAnnotated);
        };
        let table = self
            .table_id
            .as_deref()
            .and_then(|id| find_element_mut(&mut self.host, id))
            .ok_or(TableError::NoTable)?;

        let direction = sort_table(
            &mut self.sort_state,
            table,
            index,
            &self.config.sortable,
            column,
        )?;
        self.events.push(TableEvent::Sorted { column, direction });
        Ok(direction)
    }

    pub fn open_fullscreen(&mut self) -> bool {
        if !self.config.fullscreen {
            return false;
        }
        let layout = self.layout();
        let height = layout.get(&self.host.id).map_or(0, |rect| rect.height);
        let opened = self.fullscreen.open(
            Surfaces {
                host: &mut self.host,
                shadow: &mut self.shadow,
                document: &self.document,
                listeners: &mut self.listeners,
            },
            height,
        );
        if opened {
            self.events
                .push(TableEvent::FullscreenChanged { fullscreen: true });
        }
        opened
    }

    pub fn close_fullscreen(&mut self) -> bool {
        let closed = self.fullscreen.close(Surfaces {
            host: &mut self.host,
            shadow: &mut self.shadow,
            document: &self.document,
            listeners: &mut self.listeners,
        });
        if closed {
            self.events
                .push(TableEvent::FullscreenChanged { fullscreen: false });
        }
        closed
    }

    /// Show the open affordance iff the table is wider than the wrapper.
    /// Returns the overflow result.
    pub fn check_overflow(&mut self) -> bool {
        let layout = self.layout();
        let table_width = self
            .table_id
            .as_deref()
            .and_then(|id| layout.get(id))
            .map_or(0, |rect| rect.width);
        let wrapper_width = layout.get(WRAPPER_ID).map_or(0, |rect| rect.width);
        let overflowing = is_overflowing(table_width, wrapper_width);

        set_open_affordance(&mut self.shadow, overflowing);
        self.events.push(TableEvent::OverflowChecked { overflowing });
        log::debug!(
            "[table] overflow table={table_width} wrapper={wrapper_width} overflowing={overflowing}"
        );
        overflowing
    }

    /// Composed layout of the markup region with the host content projected
    /// into its slot.
    pub fn layout(&self) -> LayoutResult {
        let host_height = measure(&self.host, self.viewport)
            .get(&self.host.id)
            .map_or(0, |rect| rect.height);

        let mut shadow = self.shadow.clone();
        if let Some(slot) = find_element_mut(&mut shadow, SLOT_ID) {
            slot.height = Size::Fixed(host_height);
        }
        let mut layout = measure(&shadow, self.viewport);

        let slot = layout.get(SLOT_ID).copied().unwrap_or(self.viewport);
        layout.extend(measure(&self.host, slot.with_height(self.viewport.height)));
        layout
    }

    fn click_target(&self, x: u16, y: u16) -> Option<String> {
        let layout = self.layout();
        hit_test(&layout, &self.shadow, x, y).or_else(|| hit_test(&layout, &self.host, x, y))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The managed table.
    pub fn table(&self) -> Option<&Element> {
        find_element(&self.host, self.table_id.as_deref()?)
    }

    pub fn host(&self) -> &Element {
        &self.host
    }

    pub fn shadow(&self) -> &Element {
        &self.shadow
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn sort_state(&self) -> SortState {
        self.sort_state
    }

    pub fn sort_index(&self) -> Option<&SortIndex> {
        self.sort_index.as_ref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_fullscreen()
    }

    pub fn open_affordance_visible(&self) -> bool {
        find_element(&self.shadow, OPEN_BUTTON_ID).is_some_and(|button| !button.hidden)
    }

    pub fn highlighted(&self) -> Option<CellCoord> {
        self.hover.coordinates()
    }

    pub fn hover_rules(&self) -> &[StyleRule] {
        self.hover.rules(&self.host)
    }

    /// Background the hover rules give element `id`, if any.
    pub fn resolved_background(&self, id: &str) -> Option<&str> {
        find_element(&self.host, self.hover.style_id())
            .and_then(Element::sheet)
            .and_then(|sheet| sheet.resolve(&self.host, id, "background"))
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Take every queued engine event.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }
}
