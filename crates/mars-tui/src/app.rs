use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use mars_core::gesture::{GestureEvent, GestureRecognizer, SwipeDirection};
use mars_core::motion::AnimationDriver;
use mars_core::source::Post;
use mars_core::viewpager::Phase;
use mars_core::{
    AppConfig, ContentLookup, ContentStore, MemoryRouter, PageKind, Router, Settle, SourceData,
    Viewpager,
};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::scroll::ScrollAnimator;
use crate::theme::Theme;
use crate::themes::load_theme;
use crate::widgets::post::PostBody;

const SPINNER_FRAMES: usize = 8;

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub store: ContentStore,
    pub router: MemoryRouter,
    /// View picked for the current route
    pub page: PageKind,
    /// What the current route resolved to
    pub data: SourceData,
    /// Links the viewpager swipes through
    pub deck: Vec<String>,
    /// Mounted while the route is part of the deck
    pub pager: Option<Viewpager>,
    pub driver: AnimationDriver,
    gestures: GestureRecognizer,
    /// Item the active drag started on
    drag_source: Option<usize>,
    /// Scroll position of the settled post (or the standalone post)
    pub scroll: ScrollAnimator,
    pub max_scroll: u16,
    /// Area the page is drawn into
    pub viewport: Rect,
    bodies: HashMap<String, PostBody>,
    /// Selected row on archive pages
    pub list_cursor: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub pending_key: Option<char>,
    pub spinner_frame: usize,
    observed_link: Option<String>,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let theme = load_theme(&config.ui.theme);
        Self {
            theme,
            store: ContentStore::pending(),
            router: MemoryRouter::default(),
            page: PageKind::Loading,
            data: SourceData::Fetching,
            deck: Vec::new(),
            pager: None,
            driver: AnimationDriver::new(&config.ui.transition),
            gestures: GestureRecognizer::new(config.gesture.clone()),
            drag_source: None,
            scroll: ScrollAnimator::new(config.ui.scroll.clone()),
            max_scroll: 0,
            viewport: Rect::default(),
            bodies: HashMap::new(),
            list_cursor: 0,
            should_quit: false,
            status_message: None,
            pending_key: None,
            spinner_frame: 0,
            observed_link: None,
            config,
        }
    }

    /// Install loaded content and re-resolve the current route
    pub fn set_content(&mut self, store: ContentStore, now: Instant) {
        self.deck = store.deck(&self.config.site.deck);
        info!(
            "Content loaded: {} posts, deck of {}",
            store.post_count(),
            self.deck.len()
        );
        self.store = store;
        self.pager = None;
        self.driver.reset(0);
        self.bodies.clear();
        self.observed_link = None;
        self.sync_route(now);
    }

    /// Content could not be loaded; continue with an empty site
    pub fn content_failed(&mut self, error: &str, now: Instant) {
        warn!("Content load failed: {}", error);
        self.set_status(format!("Failed to load content: {}", error));
        self.set_content(ContentStore::new(Vec::new(), Vec::new()), now);
    }

    /// Resolve the router link into page data and keep the viewpager in step
    pub fn sync_route(&mut self, now: Instant) {
        let link = self.router.link().to_string();
        if self.observed_link.as_deref() == Some(link.as_str()) {
            return;
        }
        debug!("Route changed to {}", link);
        self.observed_link = Some(link.clone());
        self.data = self.store.get(&link);
        self.page = PageKind::resolve(&self.data, &link, &self.deck);

        if self.page == PageKind::Viewpager {
            match self.pager.as_mut() {
                Some(pager) => {
                    if pager.observe_route(&link) {
                        pager.sync_driver(&mut self.driver, now);
                    }
                }
                None => {
                    let pager = Viewpager::mount(self.deck.clone(), &link);
                    pager.mount_driver(&mut self.driver);
                    self.pager = Some(pager);
                    self.scroll.reset();
                }
            }
            return;
        }

        if self.pager.take().is_some() {
            self.driver.reset(0);
            self.gestures.cancel();
            self.drag_source = None;
        }
        self.scroll.reset();
        self.list_cursor = 0;
    }

    /// Advance animations. Items that reached their target are reported to
    /// the viewpager; a new settled post starts at the top.
    pub fn tick(&mut self, now: Instant) {
        for index in self.driver.update(now) {
            let Some(pager) = self.pager.as_mut() else {
                break;
            };
            if let Settle::Applied(settled) = pager.settle(index) {
                debug!("Post {} settled", settled);
                // A drag begun on the previous settled post ends with it
                self.gestures.cancel();
                self.drag_source = None;
                self.scroll.reset();
                pager.sync_driver(&mut self.driver, now);
            }
        }
        self.scroll.update(self.max_scroll, now);
    }

    /// Whether the next frame should come at animation speed
    pub fn needs_fast_update(&self) -> bool {
        self.driver.is_animating() || self.scroll.needs_update()
    }

    /// Record the drawing area and lay out the posts that will be shown
    pub fn layout(&mut self, area: Rect) {
        if area.width != self.viewport.width {
            self.bodies.clear();
        }
        self.viewport = area;

        let links: Vec<String> = match (&self.page, &self.pager) {
            (PageKind::Viewpager, Some(pager)) => pager
                .visible_indices()
                .map(|i| pager.links()[i].clone())
                .collect(),
            (PageKind::Post, _) => self.data.post().map(|p| p.link.clone()).into_iter().collect(),
            _ => Vec::new(),
        };
        for link in links {
            if self.bodies.contains_key(&link) {
                continue;
            }
            if let SourceData::Post(post) = self.store.get(&link) {
                let body = PostBody::layout(&post, area.width, &self.config.ui);
                self.bodies.insert(link, body);
            }
        }

        let height = self
            .scrolled_post()
            .and_then(|p| self.bodies.get(&p.link))
            .map(PostBody::height)
            .unwrap_or(0);
        self.max_scroll = height.saturating_sub(area.height);
    }

    pub fn body(&self, link: &str) -> Option<&PostBody> {
        self.bodies.get(link)
    }

    /// Post that owns the scroll position
    fn scrolled_post(&self) -> Option<Post> {
        match (&self.page, &self.pager) {
            (PageKind::Viewpager, Some(pager)) => {
                let settled = pager.settled_index()?;
                self.store.get(&pager.links()[settled]).post().cloned()
            }
            (PageKind::Post, _) => self.data.post().cloned(),
            _ => None,
        }
    }

    /// Horizontal position of a deck item in columns, relative to the viewport
    pub fn item_x(&self, index: usize) -> Option<i32> {
        let pager = self.pager.as_ref()?;
        let item = pager.item(index)?;
        if !item.visible {
            return None;
        }
        let value = self.driver.value(index)?;
        let x = value * f64::from(self.viewport.width) + item.drag_delta;
        Some(x.round() as i32)
    }

    /// Deck item under a terminal column
    pub fn item_at(&self, column: u16) -> Option<usize> {
        let pager = self.pager.as_ref()?;
        let column = i32::from(column) - i32::from(self.viewport.x);
        let width = i32::from(self.viewport.width);
        pager.visible_indices().find(|&i| {
            self.item_x(i)
                .is_some_and(|x| column >= x && column < x + width)
        })
    }

    pub fn pointer_down(&mut self, column: u16, row: u16, now: Instant) {
        if !self.in_viewport(column, row) {
            return;
        }
        let Some(source) = self.item_at(column) else {
            return;
        };
        let accepts = self
            .pager
            .as_ref()
            .is_some_and(|pager| pager.accepts_gesture(source));
        if !accepts {
            return;
        }
        self.drag_source = Some(source);
        self.gestures.press(f64::from(column), f64::from(row), now);
    }

    pub fn pointer_drag(&mut self, column: u16, row: u16, now: Instant) {
        if !self.gestures.is_active() {
            return;
        }
        if let Some(event) = self.gestures.move_to(f64::from(column), f64::from(row), now) {
            self.dispatch_gesture(event, now);
        }
    }

    pub fn pointer_up(&mut self, column: u16, row: u16, now: Instant) {
        if let Some(event) = self.gestures.release(f64::from(column), f64::from(row), now) {
            self.dispatch_gesture(event, now);
        }
        self.drag_source = None;
    }

    fn in_viewport(&self, column: u16, row: u16) -> bool {
        let area = self.viewport;
        column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
    }

    fn dispatch_gesture(&mut self, event: GestureEvent, now: Instant) {
        let Some(source) = self.drag_source else {
            return;
        };
        let Some(pager) = self.pager.as_mut() else {
            return;
        };
        if pager.handle_gesture(source, event, &mut self.router).is_some() {
            self.sync_route(now);
        }
    }

    /// Keyboard swipe, issued from the settled post
    fn swipe(&mut self, direction: SwipeDirection, now: Instant) {
        let Some(pager) = self.pager.as_mut() else {
            return;
        };
        let Some(source) = pager.settled_index() else {
            return;
        };
        if pager
            .handle_gesture(source, GestureEvent::swipe(direction), &mut self.router)
            .is_some()
        {
            self.sync_route(now);
        }
    }

    pub fn next_post(&mut self, now: Instant) {
        self.swipe(SwipeDirection::Left, now);
    }

    pub fn prev_post(&mut self, now: Instant) {
        self.swipe(SwipeDirection::Right, now);
    }

    pub fn navigate(&mut self, link: &str, now: Instant) {
        self.router.navigate(link);
        self.sync_route(now);
    }

    pub fn home(&mut self, now: Instant) {
        self.navigate("/", now);
    }

    /// Follow the header menu entry at `index`
    pub fn open_menu(&mut self, index: usize, now: Instant) {
        let Some(entry) = self.config.site.menu.get(index) else {
            return;
        };
        let link = entry.link.clone();
        self.navigate(&link, now);
    }

    pub fn history_back(&mut self, now: Instant) {
        if !self.router.can_go_back() {
            self.set_status("Already at oldest page");
            return;
        }
        self.router.back();
        self.sync_route(now);
    }

    pub fn history_forward(&mut self, now: Instant) {
        if !self.router.can_go_forward() {
            self.set_status("Already at newest page");
            return;
        }
        self.router.forward();
        self.sync_route(now);
    }

    fn list_len(&self) -> usize {
        self.data.archive().map(|a| a.items.len()).unwrap_or(0)
    }

    pub fn move_down(&mut self) {
        if self.page == PageKind::List {
            if self.list_cursor + 1 < self.list_len() {
                self.list_cursor += 1;
            }
        } else {
            self.scroll.scroll_down(self.max_scroll);
        }
    }

    pub fn move_up(&mut self) {
        if self.page == PageKind::List {
            self.list_cursor = self.list_cursor.saturating_sub(1);
        } else {
            self.scroll.scroll_up(self.max_scroll);
        }
    }

    pub fn scroll_half_page_down(&mut self) {
        self.scroll
            .scroll_half_page_down(self.viewport.height, self.max_scroll);
    }

    pub fn scroll_half_page_up(&mut self) {
        self.scroll
            .scroll_half_page_up(self.viewport.height, self.max_scroll);
    }

    pub fn scroll_page_down(&mut self) {
        self.scroll
            .scroll_full_page_down(self.viewport.height, self.max_scroll);
    }

    pub fn scroll_page_up(&mut self) {
        self.scroll
            .scroll_full_page_up(self.viewport.height, self.max_scroll);
    }

    pub fn jump_to_top(&mut self, now: Instant) {
        if self.page == PageKind::List {
            self.list_cursor = 0;
        } else {
            self.scroll.scroll_to(0, self.max_scroll, now);
        }
    }

    pub fn jump_to_bottom(&mut self, now: Instant) {
        if self.page == PageKind::List {
            self.list_cursor = self.list_len().saturating_sub(1);
        } else {
            self.scroll.scroll_to(self.max_scroll, self.max_scroll, now);
        }
    }

    /// Open the selected archive entry
    pub fn select(&mut self, now: Instant) {
        let Some(link) = self
            .data
            .archive()
            .and_then(|a| a.items.get(self.list_cursor))
            .cloned()
        else {
            return;
        };
        self.navigate(&link, now);
    }

    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES;
    }

    /// Terminal title for the current page
    pub fn document_title(&self) -> String {
        let site = &self.config.site.title;
        match self.data.title() {
            Some(title) if !self.data.is_fetching() => format!("{} - {}", title, site),
            _ => site.clone(),
        }
    }

    /// Short label for the deck state
    pub fn phase_label(&self) -> Option<&'static str> {
        let pager = self.pager.as_ref()?;
        if pager.is_dragging() {
            return Some("DRAG");
        }
        Some(match pager.phase() {
            Phase::Idle { .. } => "IDLE",
            Phase::Transitioning { .. } => "SLIDING",
            Phase::Detached => "DETACHED",
        })
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }
}
