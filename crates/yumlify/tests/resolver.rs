//! Resolver behavior against a scripted diagram service

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use yumlify::prelude::*;
use yumlify::resolver::url_from_response;

/// Service that answers from a script and records what it was asked
#[derive(Clone, Default)]
struct ScriptedService {
    calls: Arc<AtomicUsize>,
    styles: Arc<Mutex<Vec<String>>>,
    reply: Option<String>,
}

impl ScriptedService {
    fn replying(body: &str) -> Self {
        Self {
            reply: Some(body.to_string()),
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self::default()
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DiagramService for ScriptedService {
    async fn submit(&self, style: &DiagramStyle, _fragment: &str) -> Result<String, DiagramError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.styles.lock().unwrap().push(style.fragment());
        self.reply
            .clone()
            .ok_or_else(|| DiagramError::from(std::io::Error::other("connection refused")))
    }
}

fn resolver(service: ScriptedService) -> DiagramUriResolver<ScriptedService, MemoryFragmentCache> {
    DiagramUriResolver::new(
        service,
        MemoryFragmentCache::new(Duration::from_secs(30_000)),
        "https://yuml.me/",
    )
}

#[tokio::test]
async fn test_miss_then_hit() {
    let service = ScriptedService::replying("f00d.png");
    let resolver = resolver(service.clone());
    let style = DiagramStyle::default();

    let first = resolver.resolve("[A],[B]", &style).await.unwrap();
    let second = resolver.resolve("[A],[B]", &style).await.unwrap();

    assert_eq!(first, "https://yuml.me/f00d");
    assert_eq!(second, first);
    assert_eq!(service.calls(), 1);
    assert_eq!(service.styles.lock().unwrap()[0], "plain;dir:LR;scale:100");
}

#[tokio::test]
async fn test_style_is_not_part_of_the_cache_key() {
    let service = ScriptedService::replying("f00d.png");
    let resolver = resolver(service.clone());

    let plain = resolver.resolve("[A]", &DiagramStyle::default()).await.unwrap();
    let scruffy = DiagramStyle::new(Palette::Scruffy, Direction::TopToBottom, Scale::Huge);
    let reused = resolver.resolve("[A]", &scruffy).await.unwrap();

    assert_eq!(plain, reused);
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn test_distinct_fragments_each_reach_the_service() {
    let service = ScriptedService::replying("f00d.png");
    let resolver = resolver(service.clone());
    let style = DiagramStyle::default();

    resolver.resolve("[A]", &style).await.unwrap();
    resolver.resolve("[B]", &style).await.unwrap();
    assert_eq!(service.calls(), 2);
    assert_eq!(resolver.cache().len(), 2);
}

#[tokio::test]
async fn test_expired_entries_are_refetched() {
    let service = ScriptedService::replying("f00d.png");
    let resolver = DiagramUriResolver::new(
        service.clone(),
        MemoryFragmentCache::new(Duration::ZERO),
        "https://yuml.me/",
    );
    let style = DiagramStyle::default();

    resolver.resolve("[A]", &style).await.unwrap();
    resolver.resolve("[A]", &style).await.unwrap();
    assert_eq!(service.calls(), 2);
}

#[tokio::test]
async fn test_service_failure_propagates_and_is_not_cached() {
    let service = ScriptedService::failing();
    let resolver = resolver(service.clone());

    let result = resolver.resolve("[A]", &DiagramStyle::default()).await;
    assert!(matches!(result, Err(DiagramError::Io { .. })));
    assert!(resolver.cache().is_empty());

    // No retry happened behind the caller's back
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let service = ScriptedService::replying("rate limited");
    let resolver = resolver(service);

    let result = resolver.resolve("[A]", &DiagramStyle::default()).await;
    assert!(matches!(result, Err(DiagramError::MalformedResponse { .. })));
    assert!(resolver.cache().is_empty());
}

#[tokio::test]
async fn test_end_to_end_with_builder() {
    let mut registry = TypeRegistry::new();
    let animal = registry.class("Animal");
    let dog = registry.class("Dog");
    registry.edit(dog).unwrap().base(animal);
    let dsl = DiagramFragmentBuilder::new(&registry)
        .build(&[animal, dog], DiagramStyle::default(), DetailLevel::none())
        .unwrap();

    let service = ScriptedService::replying("abc123.svg");
    let resolver = resolver(service);
    let url = resolver.resolve(&dsl, &DiagramStyle::default()).await.unwrap();
    assert_eq!(url, "https://yuml.me/abc123");
}

#[tokio::test]
async fn test_resolve_model_reuses_resolver_cache() {
    let model = r#"{"types":[{"name":"Animal"},{"name":"Dog","base":"Animal"}]}"#;
    let service = ScriptedService::replying("d06.png");
    let resolver = resolver(service.clone());
    let style = DiagramStyle::default();

    for _ in 0..3 {
        let url = yumlify::resolve_model(&resolver, model, style, DetailLevel::none())
            .await
            .unwrap();
        assert_eq!(url, "https://yuml.me/d06");
    }
    assert_eq!(service.calls(), 1);
    assert_eq!(resolver.cache().len(), 1);
}

#[test]
fn test_url_uses_configured_host() {
    assert_eq!(
        url_from_response("http://localhost:8080/", "xyz.png").unwrap(),
        "http://localhost:8080/xyz"
    );
}
