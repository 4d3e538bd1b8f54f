use crate::e2e::helpers;

use helpers::providers::ProviderMocks;
use helpers::{long_script, TestApp, TestContext, UnconfiguredContext};
use hyper::StatusCode;
use meditation_backend::domain::speech::ProviderKind;
use serde_json::json;
use test_context::test_context;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, ResponseTemplate};

const RACHEL: &str = "21m00Tcm4TlvDq8ikWAM";

fn audio_path(id: i32, voice: &str) -> String {
    format!("/api/meditations/{}/audio?voice_id={}", id, voice)
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_stream_audio_from_the_first_provider(ctx: &TestContext) {
    let meditation = ctx.app.store.seed("calm", "Close your eyes. Breathe slowly.");
    ctx.app.providers.elevenlabs_speaks(b"ID3-elevenlabs").await;

    let response = ctx
        .app
        .client
        .get(&audio_path(meditation.id, RACHEL))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header("cache-control", "no-cache")
        .assert_header("content-disposition", "inline")
        .assert_header("content-length", "14")
        .assert_header("x-tts-provider", "elevenlabs");
    assert_eq!(response.body_bytes, b"ID3-elevenlabs".to_vec());
    assert_eq!(ProviderMocks::request_count(&ctx.app.providers.openai).await, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_when_quota_is_exceeded(ctx: &TestContext) {
    let meditation = ctx.app.store.seed("calm", "Rest your hands on your knees.");
    ctx.app.providers.elevenlabs_quota_exceeded().await;
    ctx.app.providers.openai_speaks(b"openai-mp3").await;

    let response = ctx
        .app
        .client
        .get(&audio_path(meditation.id, RACHEL))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-tts-provider", "openai");
    assert_eq!(response.body_bytes, b"openai-mp3".to_vec());
    assert_eq!(ProviderMocks::request_count(&ctx.app.providers.elevenlabs).await, 1);
    assert_eq!(ProviderMocks::request_count(&ctx.app.providers.groq).await, 0);

    // Rachel maps to the calm OpenAI voice
    let requests = ctx.app.providers.openai.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["voice"], "shimmer");
    assert_eq!(body["input"], "Rest your hands on your knees.");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_concatenate_chunks_in_order(ctx: &TestContext) {
    let meditation = ctx.app.store.seed("long", &long_script());
    ctx.app.providers.elevenlabs_speaks(b"[mp3]").await;

    let response = ctx
        .app
        .client
        .get(&audio_path(meditation.id, RACHEL))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let requests = ctx.app.providers.elevenlabs.received_requests().await.unwrap();
    assert!(requests.len() >= 3, "expected several chunks, got {}", requests.len());
    assert_eq!(response.body_bytes, b"[mp3]".repeat(requests.len()));

    let sent: String = requests
        .iter()
        .map(|request| {
            let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
            body["text"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(sent, long_script());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_discard_partial_audio_from_a_failed_provider(ctx: &TestContext) {
    let meditation = ctx.app.store.seed("long", &long_script());
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1/text-to-speech/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"partial".to_vec()))
        .up_to_n_times(1)
        .mount(&ctx.app.providers.elevenlabs)
        .await;
    ctx.app
        .providers
        .elevenlabs_fails(ResponseTemplate::new(500).set_body_string("internal error"))
        .await;
    ctx.app.providers.openai_speaks(b"openai-complete").await;

    let response = ctx
        .app
        .client
        .get(&audio_path(meditation.id, RACHEL))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-tts-provider", "openai");
    assert_eq!(response.body_bytes, b"openai-complete".to_vec());
    assert_eq!(ProviderMocks::request_count(&ctx.app.providers.elevenlabs).await, 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_start_with_the_prefixed_provider(ctx: &TestContext) {
    let meditation = ctx.app.store.seed("calm", "Notice the sounds around you.");
    ctx.app.providers.elevenlabs_speaks(b"never").await;
    ctx.app.providers.groq_speaks(b"groq-mp3").await;

    let response = ctx
        .app
        .client
        .get(&audio_path(meditation.id, "groq_Celeste-PlayAI"))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-tts-provider", "groq");
    assert_eq!(response.body_bytes, b"groq-mp3".to_vec());
    assert_eq!(ProviderMocks::request_count(&ctx.app.providers.elevenlabs).await, 0);

    let requests = ctx.app.providers.groq.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["voice"], "Celeste-PlayAI");
}

#[tokio::test]
async fn it_should_skip_an_unconfigured_prefixed_provider() {
    let app = TestApp::spawn(&[ProviderKind::ElevenLabs]).await;
    let meditation = app.store.seed("calm", "Let the thoughts pass.");
    app.providers.elevenlabs_speaks(b"elevenlabs-mp3").await;

    let response = app
        .client
        .get(&audio_path(meditation.id, "openai_nova"))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-tts-provider", "elevenlabs");
    assert_eq!(ProviderMocks::request_count(&app.providers.openai).await, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_500_when_every_provider_fails(ctx: &TestContext) {
    let meditation = ctx.app.store.seed("calm", "Feel your feet on the floor.");
    ctx.app.providers.elevenlabs_quota_exceeded().await;
    ctx.app
        .providers
        .openai_fails(ResponseTemplate::new(503).set_body_string("overloaded"))
        .await;
    ctx.app
        .providers
        .groq_fails(ResponseTemplate::new(400).set_body_string("model decommissioned"))
        .await;

    let response = ctx
        .app
        .client
        .get(&audio_path(meditation.id, RACHEL))
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let message = response.error_message();
    assert!(message.starts_with("Failed to generate audio"), "{}", message);
    assert!(message.contains("model decommissioned"), "{}", message);
    assert_eq!(ctx.app.providers.total_requests().await, 3);
}

#[test_context(UnconfiguredContext)]
#[tokio::test]
async fn it_should_return_500_without_any_provider(ctx: &UnconfiguredContext) {
    let meditation = ctx.app.store.seed("calm", "Breathe.");

    let response = ctx
        .app
        .client
        .get(&audio_path(meditation.id, RACHEL))
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.error_message().starts_with("Failed to generate audio"));
    assert_eq!(ctx.app.providers.total_requests().await, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_before_calling_providers(ctx: &TestContext) {
    let response = ctx.app.client.get(&audio_path(999, RACHEL)).await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error("Meditation not found");
    assert_eq!(ctx.app.providers.total_requests().await, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_ids_and_missing_voices(ctx: &TestContext) {
    let meditation = ctx.app.store.seed("calm", "Breathe.");

    let response = ctx
        .app
        .client
        .get(&format!("/api/meditations/abc/audio?voice_id={}", RACHEL))
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Invalid ID");

    let response = ctx
        .app
        .client
        .get(&format!("/api/meditations/{}/audio", meditation.id))
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Voice ID is required");

    let response = ctx
        .app
        .client
        .get(&audio_path(meditation.id, ""))
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Voice ID is required");

    assert_eq!(ctx.app.providers.total_requests().await, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_strip_markup_before_synthesis(ctx: &TestContext) {
    let script = "Title: Evening Calm\n\n# Settle In\n\n**Breathe** in. _Hold_ it.\n\n> Let go.";
    let meditation = ctx.app.store.seed("calm", script);
    ctx.app.providers.elevenlabs_speaks(b"mp3").await;

    ctx.app
        .client
        .get(&audio_path(meditation.id, RACHEL))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let requests = ctx.app.providers.elevenlabs.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body,
        json!({
            "text": "Settle In\n\nBreathe in. Hold it.\n\nLet go.",
            "model_id": "eleven_multilingual_v2",
            "voice_settings": {
                "stability": 0.75,
                "similarity_boost": 0.75,
                "style": 0.5,
                "use_speaker_boost": true
            }
        })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_script_with_nothing_to_say(ctx: &TestContext) {
    let meditation = ctx.app.store.seed("empty", "**  **\n\n__");

    let response = ctx
        .app
        .client
        .get(&audio_path(meditation.id, RACHEL))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Meditation has no speakable content");
    assert_eq!(ctx.app.providers.total_requests().await, 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_concurrent_requests_independently(ctx: &TestContext) {
    let calm = ctx.app.store.seed("calm", "Soften your jaw.");
    let sleep = ctx.app.store.seed("sleep", "Sink into the bed.");
    ctx.app.providers.elevenlabs_speaks(b"elevenlabs").await;
    ctx.app.providers.groq_speaks(b"groq").await;

    let paths = [
        audio_path(calm.id, RACHEL),
        audio_path(sleep.id, "groq_Atlas-PlayAI"),
    ];
    let responses = futures::future::join_all(paths.iter().map(|path| ctx.app.client.get(path))).await;

    let providers: Vec<String> = responses
        .into_iter()
        .map(|response| {
            let response = response.unwrap();
            response.assert_status(StatusCode::OK);
            response.header("x-tts-provider").cloned().unwrap()
        })
        .collect();
    assert_eq!(providers, vec!["elevenlabs".to_string(), "groq".to_string()]);
}
