// Copyright 2025 the Pixelpane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! TTL cache over a surface-geometry provider.

use std::time::{Duration, Instant};

use pixelpane_geometry::{GeometryError, SurfaceEvent, SurfaceGeometry, SurfaceGeometryProvider};

/// How long reported dimensions are distrusted after an orientation change.
///
/// Rotating a device fires the orientation signal before the surface has
/// its final size; platforms keep reporting the old dimensions for a beat.
/// Until this deadline passes, every read refetches instead of trusting the
/// cache.
pub const ORIENTATION_SETTLE: Duration = Duration::from_millis(150);

/// Serves a cached [`SurfaceGeometry`] snapshot for a short TTL.
///
/// Geometry queries can force synchronous layout on browser hosts, far too
/// expensive for per-pointer-move conversion. The TTL is short enough that
/// a stale snapshot is corrected within a frame or two even if the host
/// forgets to push a [`SurfaceEvent`].
#[derive(Debug)]
pub(crate) struct GeometryCache {
    ttl: Duration,
    cached: Option<(SurfaceGeometry, Instant)>,
    settle_deadline: Option<Instant>,
}

impl GeometryCache {
    pub(crate) const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            cached: None,
            settle_deadline: None,
        }
    }

    pub(crate) fn get<P: SurfaceGeometryProvider>(
        &mut self,
        provider: &P,
    ) -> Result<SurfaceGeometry, GeometryError> {
        self.get_at(provider, Instant::now())
    }

    /// Clock-injected variant of [`Self::get`].
    pub(crate) fn get_at<P: SurfaceGeometryProvider>(
        &mut self,
        provider: &P,
        now: Instant,
    ) -> Result<SurfaceGeometry, GeometryError> {
        if self.settling(now) {
            let geometry = provider.surface_geometry()?;
            self.cached = Some((geometry, now));
            return Ok(geometry);
        }
        if let Some((geometry, fetched_at)) = self.cached {
            if now.duration_since(fetched_at) < self.ttl {
                return Ok(geometry);
            }
        }
        let geometry = provider.surface_geometry()?;
        self.cached = Some((geometry, now));
        tracing::trace!(ttl = ?self.ttl, "surface geometry refreshed");
        Ok(geometry)
    }

    pub(crate) fn handle_event(&mut self, event: SurfaceEvent) {
        self.handle_event_at(event, Instant::now());
    }

    /// Clock-injected variant of [`Self::handle_event`].
    pub(crate) fn handle_event_at(&mut self, event: SurfaceEvent, now: Instant) {
        match event {
            SurfaceEvent::Resized | SurfaceEvent::VisualViewportChanged => {
                self.invalidate();
            }
            SurfaceEvent::OrientationChanged => {
                self.invalidate();
                self.settle_deadline = Some(now + ORIENTATION_SETTLE);
                tracing::trace!("orientation changed, distrusting geometry while it settles");
            }
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.cached = None;
        tracing::trace!("surface geometry invalidated");
    }

    /// Whether `now` is still inside an armed settle window. Once the
    /// deadline has passed, the deadline and any snapshot fetched inside
    /// the window are dropped together: such a snapshot may hold the
    /// pre-rotation dimensions and must not outlive the window.
    fn settling(&mut self, now: Instant) -> bool {
        match self.settle_deadline {
            Some(deadline) if now < deadline => true,
            Some(_) => {
                self.settle_deadline = None;
                self.cached = None;
                false
            }
            None => false,
        }
    }
}
