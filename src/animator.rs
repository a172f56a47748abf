//! Tween playback keyed by target handle.
//!
//! The animator knows nothing about the DOM. Hosts hand it opaque handles,
//! call [`Animator::tick`] once per frame and write each returned [`Frame`]
//! to the matching element.
//!
//! Starting a tween on properties that are already animating on the same
//! handle removes those properties from the older tween, so re-issuing the
//! same end state never stacks.

use crate::motion::{lerp, stagger_offsets, Property, Style, Timeline, Tween};

/// The full override set a handle should carry after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<H> {
    pub target: H,
    pub style: Style,
}

#[derive(Clone, Debug)]
struct Track {
    tween: Tween,
    started_at: f64,
    from: Option<Style>,
}

impl Track {
    fn drop_properties(&mut self, properties: &Style) {
        for property in properties.properties() {
            self.tween.to.remove(property);
            if let Some(from) = self.from.as_mut() {
                from.remove(property);
            }
        }
    }
}

#[derive(Clone, Debug)]
struct TargetState<H> {
    handle: H,
    style: Style,
    tracks: Vec<Track>,
    dirty: bool,
}

#[derive(Debug)]
pub struct Animator<H> {
    targets: Vec<TargetState<H>>,
}

impl<H> Default for Animator<H> {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
        }
    }
}

impl<H: Clone + PartialEq> Animator<H> {
    pub fn new() -> Self {
        Self::default()
    }

    fn state_mut(&mut self, handle: &H) -> &mut TargetState<H> {
        if let Some(index) = self.targets.iter().position(|state| state.handle == *handle) {
            return &mut self.targets[index];
        }

        self.targets.push(TargetState {
            handle: handle.clone(),
            style: Style::new(),
            tracks: Vec::new(),
            dirty: false,
        });
        let last = self.targets.len() - 1;
        &mut self.targets[last]
    }

    fn state(&self, handle: &H) -> Option<&TargetState<H>> {
        self.targets.iter().find(|state| state.handle == *handle)
    }

    /// Apply `style` immediately, cancelling any tween on those properties.
    pub fn set(&mut self, handle: &H, style: Style) {
        let state = self.state_mut(handle);
        overwrite(&mut state.tracks, &style);
        state.style.merge(&style);
        state.dirty = true;
    }

    pub fn set_all(&mut self, handles: &[H], style: Style) {
        for handle in handles {
            self.set(handle, style);
        }
    }

    /// Start `tween` on `handle` at time `now`. Explicit start values are
    /// applied immediately; otherwise the start is captured from the
    /// handle's current style when the delay elapses.
    pub fn to(&mut self, handle: &H, tween: Tween, now: f64) {
        let state = self.state_mut(handle);
        overwrite(&mut state.tracks, &tween.to);

        if let Some(from) = tween.from.as_ref() {
            state.style.merge(from);
            state.dirty = true;
        }

        state.tracks.push(Track {
            tween,
            started_at: now,
            from: tween.from,
        });
    }

    /// Start `tween` on every handle in document order, each `stagger`
    /// seconds after the previous one.
    pub fn to_staggered(&mut self, handles: &[H], tween: Tween, stagger: f64, now: f64) {
        for (handle, offset) in handles.iter().zip(stagger_offsets(handles.len(), stagger)) {
            self.to(handle, tween.delay(tween.delay + offset), now);
        }
    }

    /// Schedule every timeline entry against the handles `resolve` returns.
    pub fn play<K, F>(&mut self, timeline: &Timeline<K>, mut resolve: F, now: f64)
    where
        F: FnMut(&K) -> Vec<H>,
    {
        for (target, tween) in timeline.scheduled() {
            for handle in resolve(target) {
                self.to(&handle, tween, now);
            }
        }
    }

    /// Drop overrides (and any tween driving them) for the given properties.
    pub fn clear(&mut self, handle: &H, properties: &[Property]) {
        let mut cleared = Style::new();
        for property in properties {
            cleared.set(*property, property.rest_value());
        }

        let state = self.state_mut(handle);
        overwrite(&mut state.tracks, &cleared);
        for property in properties {
            state.style.remove(*property);
        }
        state.dirty = true;
    }

    pub fn clear_all(&mut self, handle: &H) {
        self.clear(handle, &Property::ALL);
    }

    /// Forget a handle entirely, e.g. after its element left the tree.
    pub fn forget(&mut self, handle: &H) {
        self.targets.retain(|state| state.handle != *handle);
    }

    pub fn forget_all(&mut self) {
        self.targets.clear();
    }

    pub fn style(&self, handle: &H) -> Option<&Style> {
        self.state(handle).map(|state| &state.style)
    }

    pub fn is_animating(&self, handle: &H) -> bool {
        self.state(handle).is_some_and(|state| !state.tracks.is_empty())
    }

    pub fn active_tracks(&self) -> usize {
        self.targets.iter().map(|state| state.tracks.len()).sum()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Advance every track to `now` and return the handles whose overrides
    /// changed since the last tick.
    pub fn tick(&mut self, now: f64) -> Vec<Frame<H>> {
        let mut frames = Vec::new();

        for state in &mut self.targets {
            let mut index = 0;
            while index < state.tracks.len() {
                let track = &mut state.tracks[index];
                let elapsed = now - track.started_at;

                if !track.tween.has_started(elapsed) {
                    index += 1;
                    continue;
                }

                if track.from.is_none() {
                    let mut captured = Style::new();
                    for property in track.tween.to.properties() {
                        let current = state.style.get(property);
                        captured.set(property, current.unwrap_or_else(|| property.rest_value()));
                    }
                    track.from = Some(captured);
                }
                let from = track.from.unwrap_or_default();

                let eased = track.tween.eased_at(elapsed);
                for property in track.tween.to.properties() {
                    if let (Some(start), Some(end)) = (from.get(property), track.tween.to.get(property))
                    {
                        state.style.set(property, lerp(start, end, eased));
                    }
                }
                state.dirty = true;

                if track.tween.is_complete_at(elapsed) {
                    let finished = state.tracks.remove(index);
                    if finished.tween.clear_on_complete {
                        for property in finished.tween.to.properties() {
                            state.style.remove(property);
                        }
                    }
                } else {
                    index += 1;
                }
            }

            if state.dirty {
                state.dirty = false;
                frames.push(Frame {
                    target: state.handle.clone(),
                    style: state.style,
                });
            }
        }

        frames
    }
}

fn overwrite(tracks: &mut Vec<Track>, properties: &Style) {
    for track in tracks.iter_mut() {
        track.drop_properties(properties);
    }
    tracks.retain(|track| !track.tween.to.is_empty());
}
