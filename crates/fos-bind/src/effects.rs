//! Fade and appear effects
//!
//! Opacity transitions stepped by the caller through `Document::advance`.
//! Every transition is guarded by the generation of its container at the
//! time it started: once the container is moved or removed the transition is
//! stale and gets dropped without touching the tree. Transitions on containers
//! that left the document along with an ancestor are dropped the same way.

use std::time::Duration;

use crate::{ContainerId, Document, Generation};

/// Token identifying a deferred removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeHandle {
    pub container: ContainerId,
    pub generation: Generation,
}

/// What happens when a transition completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Finish {
    Show,
    Hide,
    Remove,
}

/// Opacity transition on one container
#[derive(Debug, Clone)]
pub struct Transition {
    container: ContainerId,
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    guard: Generation,
    finish: Finish,
}

impl Transition {
    fn new(container: ContainerId, from: f32, to: f32, duration: Duration, guard: Generation, finish: Finish) -> Self {
        Self {
            container,
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            guard,
            finish,
        }
    }

    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// Current opacity
    pub fn value(&self) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let progress = (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        self.from + (self.to - self.from) * progress
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn step(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
    }
}

impl Document {
    /// Fade `container` out, hiding it at the end
    pub fn fade(&mut self, container: ContainerId, duration: Duration) {
        self.start(container, 1.0, 0.0, duration, Finish::Hide);
    }

    /// Show `container` and fade it in
    pub fn appear(&mut self, container: ContainerId, duration: Duration) {
        self.set_style(container, "display", None);
        self.set_style(container, "opacity", Some("0"));
        self.start(container, 0.0, 1.0, duration, Finish::Show);
    }

    /// Fade `container` out, then remove it. A zero duration removes it
    /// right away and returns `None`.
    pub fn remove_with_fade(&mut self, container: ContainerId, duration: Duration) -> Option<FadeHandle> {
        if container == self.root() {
            tracing::debug!("the root container cannot be removed");
            return None;
        }
        if duration.is_zero() {
            self.remove(container);
            return None;
        }
        self.start(container, 1.0, 0.0, duration, Finish::Remove);
        Some(FadeHandle {
            container,
            generation: self.generation(container),
        })
    }

    /// `insert` followed by an appear effect on success
    pub fn insert_with_fade(
        &mut self,
        scope: ContainerId,
        target: ContainerId,
        before: Option<ContainerId>,
        duration: Duration,
    ) -> bool {
        let inserted = self.insert(scope, target, before);
        if inserted && !duration.is_zero() {
            self.appear(target, duration);
        }
        inserted
    }

    /// Whether the deferred removal behind `handle` is still going to happen
    pub fn is_pending(&self, handle: FadeHandle) -> bool {
        handle.generation == self.generation(handle.container)
            && self.is_attached(handle.container)
            && self.effects.iter().any(|t| {
                t.container == handle.container && t.guard == handle.generation && t.finish == Finish::Remove
            })
    }

    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    pub fn effects(&self) -> &[Transition] {
        &self.effects
    }

    /// Step every running transition by `delta`. Returns how many completed.
    pub fn advance(&mut self, delta: Duration) -> usize {
        let mut completed = 0;
        for mut transition in std::mem::take(&mut self.effects) {
            if transition.guard != self.generation(transition.container) {
                tracing::debug!("dropping superseded transition on {:?}", transition.container);
                continue;
            }
            if !self.is_attached(transition.container) {
                tracing::debug!("dropping transition on detached {:?}", transition.container);
                continue;
            }

            transition.step(delta);
            let opacity = transition.value().to_string();
            self.set_style(transition.container, "opacity", Some(&opacity));

            if transition.is_finished() {
                self.complete(&transition);
                completed += 1;
            } else {
                self.effects.push(transition);
            }
        }
        completed
    }

    /// Run every transition to its end, one `fade_frame` at a time
    pub fn finish_effects(&mut self) -> usize {
        let frame = match self.config.fade_frame {
            frame if frame.is_zero() => Duration::MAX,
            frame => frame,
        };
        let mut completed = 0;
        while self.has_effects() {
            completed += self.advance(frame);
        }
        completed
    }

    fn start(&mut self, container: ContainerId, from: f32, to: f32, duration: Duration, finish: Finish) {
        // A new effect replaces whatever was running on the container
        self.effects.retain(|t| t.container != container);
        let transition = Transition::new(container, from, to, duration, self.generation(container), finish);
        tracing::trace!("{finish:?} transition on {container:?} over {duration:?}");
        self.effects.push(transition);
    }

    fn complete(&mut self, transition: &Transition) {
        let container = transition.container;
        match transition.finish {
            Finish::Show => self.set_style(container, "opacity", None),
            Finish::Hide => self.set_style(container, "display", Some("none")),
            Finish::Remove => {
                self.set_style(container, "opacity", None);
                self.remove(container);
            }
        }
    }

    fn set_style(&mut self, container: ContainerId, property: &str, value: Option<&str>) {
        let node = self.node_of(container);
        if let Err(err) = self.tree.set_style_property(node, property, value) {
            tracing::warn!("could not set {property} on {container:?}: {err}");
        }
    }
}
