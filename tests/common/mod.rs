#![allow(dead_code)]

use futures::future::{BoxFuture, FutureExt};
use quoteframe::platform::{ShareData, ShareFailure, ShareTarget};
use quoteframe::rendering::raster::{RasterFormat, RasterOptions, Rasterizer};
use quoteframe::{Error, GenerationRequest, QuoteGenerator, Result, Services, Surface, Viewport};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Generator with a fixed reply, optionally held until `gate` is notified.
pub struct ScriptedGenerator {
    reply: std::result::Result<String, String>,
    gate: Option<Arc<Notify>>,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn ok(text: &str) -> Self {
        Self::with(Ok(text.to_string()))
    }

    pub fn failing(cause: &str) -> Self {
        Self::with(Err(cause.to_string()))
    }

    fn with(reply: std::result::Result<String, String>) -> Self {
        Self { reply, gate: None, calls: AtomicUsize::new(0), requests: Mutex::new(Vec::new()) }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QuoteGenerator for ScriptedGenerator {
    fn generate(&self, request: GenerationRequest) -> BoxFuture<'static, Result<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.reply.clone();
        let gate = self.gate.clone();
        async move {
            request.validate()?;
            if let Some(gate) = gate {
                gate.notified().await;
            }
            reply.map_err(Error::ExternalServiceError)
        }
        .boxed()
    }
}

/// Generator whose future panics once polled.
pub struct PanickingGenerator;

impl QuoteGenerator for PanickingGenerator {
    fn generate(&self, _request: GenerationRequest) -> BoxFuture<'static, Result<String>> {
        async move { panic!("generator blew up") }.boxed()
    }
}

/// Rasterizer that records what it was asked to paint.
pub struct RecordingRasterizer {
    output: Option<Vec<u8>>,
    pub calls: AtomicUsize,
    pub quotes: Mutex<Vec<String>>,
    pub formats: Mutex<Vec<(u32, RasterFormat)>>,
}

impl RecordingRasterizer {
    /// Returns `bytes` for every call.
    pub fn returning(bytes: &[u8]) -> Self {
        Self::with(Some(bytes.to_vec()))
    }

    /// Fails every call with a render error.
    pub fn failing() -> Self {
        Self::with(None)
    }

    fn with(output: Option<Vec<u8>>) -> Self {
        Self {
            output,
            calls: AtomicUsize::new(0),
            quotes: Mutex::new(Vec::new()),
            formats: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Rasterizer for RecordingRasterizer {
    fn rasterize(&self, surface: &Surface, pixel_ratio: u32, format: RasterFormat) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.quotes.lock().unwrap().push(surface.composition.quote_text.clone());
        self.formats.lock().unwrap().push((pixel_ratio, format));
        self.output
            .clone()
            .ok_or_else(|| Error::RenderError("image content could not be decoded".into()))
    }
}

/// Share target with a scripted response.
pub struct ScriptedShare {
    pub supported: bool,
    pub accepts: bool,
    pub response: std::result::Result<(), ShareFailure>,
    pub shared: Mutex<Vec<ShareData>>,
}

impl ScriptedShare {
    pub fn accepting() -> Self {
        Self { supported: true, accepts: true, response: Ok(()), shared: Mutex::new(Vec::new()) }
    }

    pub fn responding(response: std::result::Result<(), ShareFailure>) -> Self {
        Self { response, ..Self::accepting() }
    }

    pub fn refusing_payload() -> Self {
        Self { accepts: false, ..Self::accepting() }
    }

    pub fn shared(&self) -> Vec<ShareData> {
        self.shared.lock().unwrap().clone()
    }
}

impl ShareTarget for ScriptedShare {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn can_share(&self, _data: &ShareData) -> bool {
        self.supported && self.accepts
    }

    fn share(&self, data: ShareData) -> std::result::Result<(), ShareFailure> {
        self.shared.lock().unwrap().push(data);
        self.response.clone()
    }
}

pub fn services(
    generator: Arc<dyn QuoteGenerator>,
    rasterizer: Arc<dyn Rasterizer>,
    share: Arc<dyn ShareTarget>,
) -> Services {
    Services {
        generator,
        rasterizer,
        share,
        options: RasterOptions::default(),
        viewport: Viewport::default(),
    }
}

pub const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
