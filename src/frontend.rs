use futures_util::future::{select, Either};
use gloo_events::EventListener;
use gloo_net::http::Request;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::{callback::Timeout, future::TimeoutFuture};
use rand::{rngs::SmallRng, SeedableRng};
use scroll_portfolio::{
    animator::{Animator, Frame},
    choreo::ScrollChoreographer,
    config::{MotionConfig, DEFAULT_SKILLS_LIMIT},
    content::{
        visible_skills, ContentItem, Section, SkillEntry, EXPERIENCES, OWNER_NAME, PRELOAD_ASSETS,
        RESUME_FILE_NAME, SKILLS, SOCIAL_LINKS,
    },
    intro::{reveal_timeline, AssetOutcome, IntroEffect, IntroEvent, IntroSequencer, REVEAL_STAGE},
    motion::Timeline,
    nav::{self, NavEffect, NavTarget, BODY_LOCK_CLASS, BODY_LOCK_STYLES, BODY_RELEASE_VALUE},
    parallax::{layer_targets, PointerKind},
    particles::{generate, ParticleProfile},
    state::{SkillsToggle, UiState},
    targets::{SectionBounds, TargetGroup, TargetResolver, Viewport},
    telemetry::Logger,
};
use serde_json::json;
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, CssStyleDeclaration, Document, Element, HtmlElement, HtmlImageElement, MouseEvent,
    ScrollBehavior, ScrollToOptions, SvgElement, TouchEvent,
};
use yew::prelude::*;

const MOTION_CONFIG_URL: &str = "/api/motion-config";
const CONFIG_FETCH_TIMEOUT_MS: u32 = 800;
const RESUME_URL: &str = "/resume";
const PARTICLE_FIELD_CLASS: &str = "particle-field";
const NAV_SECTIONS: [Section; 3] = [Section::Portfolio, Section::Skills, Section::Contact];

type Shared = Rc<RefCell<Stage>>;

/// What the markup needs to know about the motion state.
#[derive(Clone, Copy, PartialEq)]
struct ViewState {
    ui: UiState,
    skills_limit: usize,
    intro_mounted: bool,
}

impl ViewState {
    fn initial() -> Self {
        Self {
            ui: UiState::new(),
            skills_limit: DEFAULT_SKILLS_LIMIT,
            intro_mounted: true,
        }
    }
}

/// Everything the timers, listeners and frame loop share.
struct Stage {
    config: MotionConfig,
    logger: Logger,
    ui: UiState,
    intro: IntroSequencer,
    animator: Animator<Element>,
    choreo: Option<ScrollChoreographer<Element>>,
    reveal: Timeline<TargetGroup>,
    reveal_started_at: Option<f64>,
    timers: Vec<Timeout>,
    listeners: Vec<EventListener>,
    preload: Vec<HtmlImageElement>,
    frame: Option<AnimationFrame>,
    particles: Vec<Element>,
    body_locked: bool,
    torn_down: bool,
    on_change: Callback<ViewState>,
}

impl Stage {
    fn new(on_change: Callback<ViewState>) -> Self {
        let config = MotionConfig::default();
        let logger = Logger::new(config.log_level);

        Self {
            intro: IntroSequencer::new(PRELOAD_ASSETS.len(), &config, logger),
            config,
            logger,
            ui: UiState::new(),
            animator: Animator::new(),
            choreo: None,
            reveal: reveal_timeline(),
            reveal_started_at: None,
            timers: Vec::new(),
            listeners: Vec::new(),
            preload: Vec::new(),
            frame: None,
            particles: Vec::new(),
            body_locked: false,
            torn_down: false,
            on_change,
        }
    }

    fn configure(&mut self, config: MotionConfig) {
        self.logger = Logger::new(config.log_level);
        self.intro = IntroSequencer::new(PRELOAD_ASSETS.len(), &config, self.logger);
        self.config = config;
    }

    fn view(&self) -> ViewState {
        ViewState {
            ui: self.ui,
            skills_limit: self.config.skills_limit,
            intro_mounted: self.intro.intro_visual_mounted(),
        }
    }
}

/// Resolves target groups against the live document.
struct DomTargets {
    document: Document,
}

impl DomTargets {
    fn current() -> Option<Self> {
        window()?.document().map(|document| Self { document })
    }
}

impl TargetResolver for DomTargets {
    type Handle = Element;

    fn resolve(&self, group: TargetGroup) -> Vec<Element> {
        let Ok(nodes) = self
            .document
            .query_selector_all(&format!(".{}", group.class_name()))
        else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn section_bounds(&self, section: Section) -> Option<SectionBounds> {
        let element = self.document.get_element_by_id(section.element_id())?;
        let rect = element.get_bounding_client_rect();
        let scroll_y = window()?.scroll_y().ok()?;

        Some(SectionBounds {
            top: rect.top() + scroll_y,
            bottom: rect.bottom() + scroll_y,
        })
    }
}

fn now_seconds() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now() / 1000.0)
        .unwrap_or(0.0)
}

fn current_viewport() -> Option<Viewport> {
    let win = window()?;
    Some(Viewport {
        scroll_y: win.scroll_y().ok()?,
        height: win.inner_height().ok()?.as_f64()?,
    })
}

fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

fn element_style(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element.dyn_ref::<SvgElement>().map(|svg| svg.style())
}

fn apply_frame(frame: &Frame<Element>) {
    let Some(style) = element_style(&frame.target) else {
        return;
    };

    let _ = match frame.style.transform_css() {
        Some(transform) => style.set_property("transform", &transform),
        None => style.remove_property("transform").map(|_| ()),
    };
    let _ = match frame.style.opacity_css() {
        Some(opacity) => style.set_property("opacity", &opacity),
        None => style.remove_property("opacity").map(|_| ()),
    };
}

fn set_body_lock(locked: bool) {
    let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };

    let style = body.style();
    for (property, value) in BODY_LOCK_STYLES {
        let value = if locked { value } else { BODY_RELEASE_VALUE };
        let _ = style.set_property(property, value);
    }

    let classes = body.class_list();
    let _ = if locked {
        classes.add_1(BODY_LOCK_CLASS)
    } else {
        classes.remove_1(BODY_LOCK_CLASS)
    };
}

fn scroll_to(target: NavTarget) {
    let Some(win) = window() else {
        return;
    };

    let top = match target.element_id() {
        None => 0.0,
        Some(id) => {
            let Some(element) = win.document().and_then(|d| d.get_element_by_id(id)) else {
                return;
            };
            element.get_bounding_client_rect().top() + win.scroll_y().unwrap_or(0.0)
        }
    };

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

async fn fetch_motion_config() -> Result<MotionConfig, String> {
    let response = Request::get(MOTION_CONFIG_URL)
        .send()
        .await
        .map_err(|error| error.to_string())?;
    if !response.ok() {
        return Err(format!("received status {}", response.status()));
    }

    let raw = response.text().await.map_err(|error| error.to_string())?;
    MotionConfig::from_json(&raw).map_err(|error| error.to_string())
}

/// Server tuning if it answers quickly, defaults otherwise.
async fn load_motion_config() -> MotionConfig {
    let logger = Logger::default();
    let fetch = Box::pin(fetch_motion_config());
    let timeout = Box::pin(TimeoutFuture::new(CONFIG_FETCH_TIMEOUT_MS));

    match select(fetch, timeout).await {
        Either::Left((Ok(config), _)) => config,
        Either::Left((Err(message), _)) => {
            logger.warn("frontend.config_fetch_failed", json!({ "message": message }));
            MotionConfig::default()
        }
        Either::Right(_) => {
            logger.warn(
                "frontend.config_fetch_timeout",
                json!({ "timeout_ms": CONFIG_FETCH_TIMEOUT_MS }),
            );
            MotionConfig::default()
        }
    }
}

fn publish(stage: &Shared) {
    let (on_change, view) = {
        let stage = stage.borrow();
        (stage.on_change.clone(), stage.view())
    };
    on_change.emit(view);
}

fn start(stage: &Shared) {
    let effects = {
        let mut stage = stage.borrow_mut();
        if stage.torn_down {
            return;
        }
        stage.intro.start()
    };
    publish(stage);
    apply_intro_effects(stage, effects);
    preload_assets(stage);
    schedule_frame(stage);
}

fn preload_assets(stage: &Shared) {
    let mut images = Vec::new();
    let mut listeners = Vec::new();

    for src in PRELOAD_ASSETS {
        let Ok(image) = HtmlImageElement::new() else {
            dispatch(stage, IntroEvent::AssetSettled(AssetOutcome::Failed));
            continue;
        };

        for (event, outcome) in [("load", AssetOutcome::Loaded), ("error", AssetOutcome::Failed)] {
            let weak = Rc::downgrade(stage);
            listeners.push(EventListener::once(&image, event, move |_| {
                if let Some(stage) = weak.upgrade() {
                    dispatch(&stage, IntroEvent::AssetSettled(outcome));
                }
            }));
        }
        image.set_src(src);
        images.push(image);
    }

    let mut stage = stage.borrow_mut();
    stage.preload = images;
    stage.listeners.extend(listeners);
}

fn dispatch(stage: &Shared, event: IntroEvent) {
    let effects = {
        let mut guard = stage.borrow_mut();
        let stage = &mut *guard;
        if stage.torn_down {
            return;
        }
        stage.intro.handle(&mut stage.ui, event)
    };
    apply_intro_effects(stage, effects);
}

fn schedule_intro_event(stage: &Shared, delay_ms: u32, event: IntroEvent) {
    let weak = Rc::downgrade(stage);
    let timeout = Timeout::new(delay_ms, move || {
        if let Some(stage) = weak.upgrade() {
            dispatch(&stage, event);
        }
    });
    stage.borrow_mut().timers.push(timeout);
}

fn apply_intro_effects(stage: &Shared, effects: Vec<IntroEffect>) {
    let mut changed = false;

    for effect in effects {
        match effect {
            IntroEffect::ScheduleLoadFallback(ms) => {
                schedule_intro_event(stage, ms, IntroEvent::LoadFallbackElapsed)
            }
            IntroEffect::ScheduleVisibilityFallback(ms) => {
                schedule_intro_event(stage, ms, IntroEvent::VisibilityFallbackElapsed)
            }
            IntroEffect::ScheduleSettleDelay(ms) => {
                schedule_intro_event(stage, ms, IntroEvent::SettleDelayElapsed)
            }
            IntroEffect::StartReveal => {
                start_reveal(stage);
                changed = true;
            }
            IntroEffect::ShowContent => changed = true,
            IntroEffect::RemoveIntroVisual => {
                remove_intro_visual(stage);
                changed = true;
            }
        }
    }

    if changed {
        publish(stage);
    }
}

fn start_reveal(stage: &Shared) {
    let Some(targets) = DomTargets::current() else {
        return;
    };
    let now = now_seconds();

    let mut guard = stage.borrow_mut();
    let stage = &mut *guard;
    stage
        .animator
        .play(&stage.reveal, |group| targets.resolve(*group), now);
    stage.reveal_started_at = Some(now);
}

fn remove_intro_visual(stage: &Shared) {
    let masks = DomTargets::current()
        .map(|targets| targets.resolve(TargetGroup::IntroMask))
        .unwrap_or_default();

    let mut stage = stage.borrow_mut();
    stage.reveal_started_at = None;
    for mask in &masks {
        stage.animator.forget(mask);
    }
}

fn schedule_frame(stage: &Shared) {
    let weak: Weak<RefCell<Stage>> = Rc::downgrade(stage);
    let handle = request_animation_frame(move |_| {
        let Some(stage) = weak.upgrade() else {
            return;
        };
        stage.borrow_mut().frame.take();
        tick(&stage);
        if !stage.borrow().torn_down {
            schedule_frame(&stage);
        }
    });
    stage.borrow_mut().frame = Some(handle);
}

fn tick(stage: &Shared) {
    let now = now_seconds();

    let (frames, events) = {
        let mut stage = stage.borrow_mut();
        let frames = stage.animator.tick(now);
        let mut events = Vec::new();

        if let Some(started_at) = stage.reveal_started_at {
            let elapsed = now - started_at;
            if !stage.ui.content_visible() {
                if let Some(progress) = stage.reveal.entry_progress(REVEAL_STAGE, elapsed) {
                    events.push(IntroEvent::RevealProgress(progress));
                }
            }
            if elapsed >= stage.reveal.duration() {
                stage.reveal_started_at = None;
                events.push(IntroEvent::RevealCompleted);
            }
        }
        (frames, events)
    };

    for frame in &frames {
        apply_frame(frame);
    }
    for event in events {
        dispatch(stage, event);
    }
}

fn on_content_visible(stage: &Shared) {
    let Some(targets) = DomTargets::current() else {
        return;
    };
    let now = now_seconds();

    {
        let mut guard = stage.borrow_mut();
        let stage = &mut *guard;
        if stage.choreo.is_some() || stage.torn_down {
            return;
        }
        match ScrollChoreographer::attach(
            &stage.ui,
            &targets,
            &mut stage.animator,
            &stage.config,
            stage.logger,
            now,
        ) {
            Ok(choreo) => stage.choreo = Some(choreo),
            Err(error) => {
                stage
                    .logger
                    .warn("frontend.choreo_attach_failed", json!({ "message": error.to_string() }));
                return;
            }
        }
    }

    spawn_particles(stage, &targets.document);
    install_scroll_listeners(stage);
    install_parallax_listeners(stage, &targets);
    handle_scroll(stage);
}

fn spawn_particles(stage: &Shared, document: &Document) {
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
    let mut rng = SmallRng::seed_from_u64(seed);
    let now = now_seconds();

    let mut guard = stage.borrow_mut();
    let stage = &mut *guard;
    let counts = stage.config.particles;
    let hosts = [
        (format!(".{PARTICLE_FIELD_CLASS}"), ParticleProfile::Ambient, counts.ambient),
        (format!("#{}", Section::Portfolio.element_id()), ParticleProfile::Section, counts.portfolio),
        (format!("#{}", Section::Skills.element_id()), ParticleProfile::Section, counts.skills),
        (format!("#{}", Section::Contact.element_id()), ParticleProfile::Section, counts.contact),
    ];

    for (selector, profile, count) in hosts {
        let Some(host) = document.query_selector(&selector).ok().flatten() else {
            stage
                .logger
                .debug("frontend.particle_host_missing", json!({ "selector": selector }));
            continue;
        };

        for spec in generate(profile, count, &mut rng) {
            let Ok(node) = document.create_element("div") else {
                continue;
            };
            node.set_class_name(profile.class_name());
            let _ = node.set_attribute("style", &spec.inline_css());
            if host.append_child(&node).is_err() {
                continue;
            }

            stage.animator.set(&node, spec.initial_style());
            stage.animator.to(&node, spec.drift_tween(), now);
            stage.animator.to(&node, spec.fade_tween(), now);
            stage.particles.push(node);
        }
    }

    stage
        .logger
        .debug("frontend.particles_spawned", json!({ "count": stage.particles.len() }));
}

fn install_scroll_listeners(stage: &Shared) {
    let Some(win) = window() else {
        return;
    };

    let listeners: Vec<EventListener> = ["scroll", "resize"]
        .into_iter()
        .map(|event| {
            let weak = Rc::downgrade(stage);
            EventListener::new(&win, event, move |_| {
                if let Some(stage) = weak.upgrade() {
                    handle_scroll(&stage);
                }
            })
        })
        .collect();

    stage.borrow_mut().listeners.extend(listeners);
}

fn handle_scroll(stage: &Shared) {
    let (Some(targets), Some(viewport)) = (DomTargets::current(), current_viewport()) else {
        return;
    };
    let now = now_seconds();

    let mut guard = stage.borrow_mut();
    let stage = &mut *guard;
    if let Some(choreo) = stage.choreo.as_mut() {
        choreo.on_scroll(viewport, &targets, &mut stage.animator, now);
    }
}

fn install_parallax_listeners(stage: &Shared, targets: &DomTargets) {
    let Some(hero) = targets.resolve(TargetGroup::HeroMain).into_iter().next() else {
        return;
    };

    let mouse = {
        let weak = Rc::downgrade(stage);
        EventListener::new(&hero, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Some(stage) = weak.upgrade() {
                handle_pointer(&stage, PointerKind::Mouse, f64::from(event.client_x()));
            }
        })
    };

    let touch = {
        let weak = Rc::downgrade(stage);
        EventListener::new(&hero, "touchmove", move |event| {
            let Some(touch) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|event| event.touches().get(0))
            else {
                return;
            };
            if let Some(stage) = weak.upgrade() {
                handle_pointer(&stage, PointerKind::Touch, f64::from(touch.client_x()));
            }
        })
    };

    stage.borrow_mut().listeners.extend([mouse, touch]);
}

fn handle_pointer(stage: &Shared, kind: PointerKind, client_x: f64) {
    let Some(targets) = DomTargets::current() else {
        return;
    };
    let now = now_seconds();
    let width = viewport_width();

    let mut guard = stage.borrow_mut();
    let stage = &mut *guard;
    for layer in layer_targets(kind, client_x, width, &stage.config) {
        for handle in targets.resolve(layer.group) {
            stage.animator.to(&handle, layer.tween(), now);
        }
    }
}

fn toggle_nav(stage: &Shared) {
    let effects = nav::toggle(&mut stage.borrow_mut().ui);
    publish(stage);
    apply_nav_effects(stage, effects);
}

fn activate_nav(stage: &Shared, target: NavTarget) {
    let effects = {
        let mut guard = stage.borrow_mut();
        let stage = &mut *guard;
        nav::activate(&mut stage.ui, target, stage.config.nav_scroll_delay_ms)
    };
    publish(stage);
    apply_nav_effects(stage, effects);
}

fn apply_nav_effects(stage: &Shared, effects: Vec<NavEffect>) {
    for effect in effects {
        match effect {
            NavEffect::LockBody => {
                set_body_lock(true);
                stage.borrow_mut().body_locked = true;
            }
            NavEffect::ReleaseBody => {
                set_body_lock(false);
                stage.borrow_mut().body_locked = false;
            }
            NavEffect::PlayEntrance => {
                let Some(targets) = DomTargets::current() else {
                    continue;
                };
                let now = now_seconds();
                nav::play_entrance(&targets, &mut stage.borrow_mut().animator, now);
            }
            NavEffect::ScrollTo { target, delay_ms } => {
                let timeout = Timeout::new(delay_ms, move || scroll_to(target));
                stage.borrow_mut().timers.push(timeout);
            }
        }
    }
}

fn toggle_skills(stage: &Shared) {
    let (toggle, settle_ms) = {
        let mut stage = stage.borrow_mut();
        (stage.ui.toggle_skills(), stage.config.skills_settle_ms)
    };
    publish(stage);

    let weak = Rc::downgrade(stage);
    let timeout = Timeout::new(settle_ms, move || {
        if let Some(stage) = weak.upgrade() {
            apply_skills_toggle(&stage, toggle);
        }
    });
    stage.borrow_mut().timers.push(timeout);
}

fn apply_skills_toggle(stage: &Shared, toggle: SkillsToggle) {
    let Some(targets) = DomTargets::current() else {
        return;
    };
    let now = now_seconds();

    let mut guard = stage.borrow_mut();
    let stage = &mut *guard;
    if let Some(choreo) = stage.choreo.as_mut() {
        choreo.on_skills_toggled(toggle, &targets, &mut stage.animator, now);
    }
}

fn teardown(stage: &Shared) {
    let (particles, body_locked, logger) = {
        let mut stage = stage.borrow_mut();
        stage.torn_down = true;
        stage.timers.clear();
        stage.listeners.clear();
        stage.frame = None;
        stage.preload.clear();
        stage.choreo = None;
        stage.animator.forget_all();
        (
            std::mem::take(&mut stage.particles),
            std::mem::replace(&mut stage.body_locked, false),
            stage.logger,
        )
    };

    let removed = particles.len();
    for node in particles {
        node.remove();
    }
    if body_locked {
        set_body_lock(false);
    }
    logger.debug("frontend.teardown", json!({ "particles_removed": removed }));
}

fn nav_click(on_nav: &Callback<NavTarget>, target: NavTarget) -> Callback<MouseEvent> {
    let on_nav = on_nav.clone();
    Callback::from(move |_| on_nav.emit(target))
}

#[function_component(IntroMask)]
fn intro_mask() -> Html {
    html! {
        <div class="svg intro-overlay">
            <svg viewBox="0 0 800 600" preserveAspectRatio="xMidYMid slice">
                <defs>
                    <mask id="viMask">
                        <rect width="100%" height="100%" fill="black" />
                        <g class={TargetGroup::IntroMask.class_name()} style="transform-origin: 50% 50%; transform-box: fill-box;">
                            <text
                                x="50%"
                                y="50%"
                                font-size="150"
                                text-anchor="middle"
                                fill="white"
                                dominant-baseline="middle"
                                font-family="Arial Black"
                            >
                                {"ANKIT"}
                            </text>
                        </g>
                    </mask>
                </defs>
                <image href="/bg.png" width="100%" height="100%" preserveAspectRatio="xMidYMid slice" mask="url(#viMask)" />
            </svg>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NavLinksProps {
    class: AttrValue,
    on_nav: Callback<NavTarget>,
}

#[function_component(NavLinks)]
fn nav_links(props: &NavLinksProps) -> Html {
    html! {
        <>
            <button class={props.class.clone()} type="button" onclick={nav_click(&props.on_nav, NavTarget::Top)}>
                {"Home"}
            </button>
            { for NAV_SECTIONS.into_iter().map(|section| html! {
                <button
                    class={props.class.clone()}
                    type="button"
                    onclick={nav_click(&props.on_nav, NavTarget::Section(section))}
                >
                    {section.label()}
                </button>
            }) }
        </>
    }
}

#[derive(Properties, PartialEq)]
struct ExperienceCardProps {
    item: ContentItem,
}

#[function_component(ExperienceCard)]
fn experience_card(props: &ExperienceCardProps) -> Html {
    let item = props.item;
    html! {
        <article class={TargetGroup::ExperienceCards.class_name()}>
            <header>
                <h3>{item.title}</h3>
                <p class="organization">{item.organization}</p>
                <p class="period">{item.period}</p>
            </header>
            <p>{item.description}</p>
            <ul class="tags">
                { for item.tags.iter().map(|tag| html! { <li>{*tag}</li> }) }
            </ul>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct SkillRowProps {
    skill: SkillEntry,
}

#[function_component(SkillRow)]
fn skill_row(props: &SkillRowProps) -> Html {
    let skill = props.skill;
    let width = format!("width: {}; transform-origin: left center;", skill.level_percent());
    html! {
        <div class={TargetGroup::SkillItems.class_name()}>
            <div class="skill-head">
                <i class={skill.icon} aria-hidden="true"></i>
                <span class="skill-name">{skill.name}</span>
                <span class="skill-level">{skill.level_percent()}</span>
            </div>
            <div class="skill-track">
                <div class={TargetGroup::SkillBars.class_name()} style={width}></div>
            </div>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let view = use_state(ViewState::initial);
    let on_change = {
        let view = view.clone();
        Callback::from(move |next: ViewState| view.set(next))
    };
    let stage = use_mut_ref(move || Stage::new(on_change));

    {
        let stage = stage.clone();
        use_effect_with((), move |_| {
            let weak = Rc::downgrade(&stage);
            spawn_local(async move {
                let config = load_motion_config().await;
                let Some(stage) = weak.upgrade() else {
                    return;
                };
                stage.borrow_mut().configure(config);
                start(&stage);
            });
            move || teardown(&stage)
        });
    }

    {
        let stage = stage.clone();
        use_effect_with(view.ui.content_visible(), move |visible| {
            if *visible {
                on_content_visible(&stage);
            }
            || ()
        });
    }

    let on_nav = {
        let stage = stage.clone();
        Callback::from(move |target: NavTarget| activate_nav(&stage, target))
    };
    let on_toggle_nav = {
        let stage = stage.clone();
        Callback::from(move |_: MouseEvent| toggle_nav(&stage))
    };
    let on_toggle_skills = {
        let stage = stage.clone();
        Callback::from(move |_: MouseEvent| toggle_skills(&stage))
    };

    let ui = view.ui;
    let skills = visible_skills(&SKILLS, ui.skills_expanded(), view.skills_limit);
    let skills_label = if ui.skills_expanded() {
        "Show less"
    } else {
        "Show more"
    };

    html! {
        <>
            <div class={PARTICLE_FIELD_CLASS} aria-hidden="true"></div>
            if view.intro_mounted {
                <IntroMask />
            }
            if ui.content_visible() {
                <div class={TargetGroup::HeroMain.class_name()}>
                    <section class="landing">
                        <nav class="top-bar">
                            <span class="brand">{OWNER_NAME}</span>
                            <button
                                class={classes!("menu-toggle", ui.nav_open().then_some("is-open"))}
                                type="button"
                                aria-label="Toggle navigation"
                                aria-expanded={ui.nav_open().to_string()}
                                onclick={on_toggle_nav.clone()}
                            >
                                <i class={if ui.nav_open() { "ri-close-line" } else { "ri-menu-line" }}></i>
                            </button>
                        </nav>
                        <div class="imagesdiv">
                            <img class={TargetGroup::HeroSky.class_name()} src="/sky.png" alt="" />
                            <img class={TargetGroup::HeroBackground.class_name()} src="/bg.png" alt="" />
                            <div class={TargetGroup::HeroHeadline.class_name()}>
                                <h1>{"grand"}</h1>
                                <h1>{"theft"}</h1>
                                <h1>{"auto"}</h1>
                            </div>
                            <img class={TargetGroup::HeroCharacter.class_name()} src="/ank.png" alt={OWNER_NAME} />
                        </div>
                    </section>

                    <section id={Section::Profile.element_id()} class="profile">
                        <div class="profile-media">
                            <img class={TargetGroup::ProfileImage.class_name()} src="/ank2.png" alt={OWNER_NAME} />
                        </div>
                        <div class={TargetGroup::ProfileOverlay.class_name()}>
                            <h2>{"Still Running,"}</h2>
                            <h2>{"Not Hunting"}</h2>
                            <p>{"Software engineer building backend services, cloud deployments and interactive web experiences."}</p>
                            <a class="resume-link" href={RESUME_URL} download={RESUME_FILE_NAME}>
                                {"Download Resume"}
                            </a>
                        </div>
                    </section>

                    <section id={Section::Portfolio.element_id()} class="portfolio-section">
                        <h2 class={TargetGroup::PortfolioTitle.class_name()}>{"Experience"}</h2>
                        <div id={Section::Experience.element_id()} class="experience-container">
                            { for EXPERIENCES.into_iter().map(|item| html! { <ExperienceCard {item} /> }) }
                        </div>
                    </section>

                    <section id={Section::Skills.element_id()} class="skills-container">
                        <h2>{"Skills"}</h2>
                        <div class="skills-grid">
                            { for skills.iter().map(|skill| html! { <SkillRow key={skill.name} skill={*skill} /> }) }
                        </div>
                        if SKILLS.len() > view.skills_limit {
                            <button class="skills-toggle" type="button" onclick={on_toggle_skills}>
                                {skills_label}
                            </button>
                        }
                    </section>

                    <section id={Section::Contact.element_id()} class="contact-section">
                        <h2>{"Contact"}</h2>
                        <ul class="social-links">
                            { for SOCIAL_LINKS.into_iter().map(|link| html! {
                                <li>
                                    <a href={link.href} target="_blank" rel="noopener noreferrer" aria-label={link.label}>
                                        <i class={link.icon} aria-hidden="true"></i>
                                        {link.label}
                                    </a>
                                </li>
                            }) }
                        </ul>
                    </section>

                    <nav class={TargetGroup::FloatingNav.class_name()}>
                        <NavLinks class="floating-nav-btn" on_nav={on_nav.clone()} />
                    </nav>

                    <div class={classes!("mobile-nav", ui.nav_open().then_some("is-open"))} aria-hidden={(!ui.nav_open()).to_string()}>
                        <NavLinks class={TargetGroup::MobileNavButtons.class_name()} on_nav={on_nav} />
                        <div class="mobile-nav-social-row">
                            { for SOCIAL_LINKS.into_iter().map(|link| html! {
                                <a class={TargetGroup::MobileNavSocial.class_name()} href={link.href} target="_blank" rel="noopener noreferrer" aria-label={link.label}>
                                    <i class={link.icon} aria-hidden="true"></i>
                                </a>
                            }) }
                        </div>
                    </div>
                </div>
            }
        </>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
