use std::fs;

use tempfile::TempDir;
use tree_ai::config::TreeAiConfig;
use tree_ai::tooling::cli::CliContext;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::sample_tree;

fn described_config(endpoint: Option<String>, program: &str) -> TreeAiConfig {
    let mut config = TreeAiConfig::default();
    config.render.color = false;
    config.describe.model = "test-model".to_string();
    config.describe.endpoint = endpoint;
    config.describe.health_timeout_ms = 500;
    config.describe.local.program = program.to_string();
    config.describe.local.args = Vec::new();
    config
}

fn render(root: &std::path::Path, config: TreeAiConfig) -> String {
    let ctx = CliContext::from_config(root.to_path_buf(), config);
    let mut out = Vec::new();
    ctx.run(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn every_line_falls_back_to_template_when_nothing_answers() {
    let temp = TempDir::new().unwrap();
    sample_tree(temp.path());

    let config = described_config(
        Some("http://127.0.0.1:9/v1/completions".to_string()),
        "/definitely/not/a/python",
    );
    let output = render(temp.path(), config);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        [
            "└── 📄 a.txt » (File handling a functionality using model test-model)",
            "├── 💼 b » (Directory for managing b using model test-model)",
            "│   └── 📄 c.txt » (File handling c functionality using model test-model)",
        ]
    );
}

#[test]
fn healthy_endpoint_supplies_descriptions() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("main.rs"), "fn main() {}\n").unwrap();

    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"text": "\nDescription: The file main.rs is the program entry point.\n"}]
            })))
            .mount(&server)
            .await;
    });

    let config = described_config(
        Some(format!("{}/v1/completions", server.uri())),
        "/definitely/not/a/python",
    );
    let output = render(temp.path(), config);
    assert_eq!(output, "└── 📄 main.rs » The program entry point.\n");
}

#[cfg(unix)]
#[test]
fn unhealthy_endpoint_routes_to_local_subprocess() {
    use crate::support::executable_script;

    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("notes.md"), "# notes\n").unwrap();

    let calls = temp.path().join("calls");
    let script = executable_script(
        temp.path(),
        "infer.sh",
        &format!(
            "echo called >> {}\necho 'Keeps meeting notes'",
            calls.display()
        ),
    );

    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
    });

    let config = described_config(
        Some(format!("{}/v1/completions", server.uri())),
        script.to_str().unwrap(),
    );
    let output = render(&root, config);

    assert_eq!(output, "└── 📄 notes.md » Keeps meeting notes\n");
    assert_eq!(fs::read_to_string(&calls).unwrap().lines().count(), 1);
    let received = rt.block_on(server.received_requests()).unwrap();
    assert!(received.iter().all(|r| r.method.as_str() != "POST"));
}
