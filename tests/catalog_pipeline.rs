use std::fs;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use predicates::prelude::*;

const TOOLS_JSON: &str = r#"[
  {
    "Tool": "Seurat",
    "Description": "R toolkit for single cell genomics",
    "Platform": "R",
    "Code": "https://github.com/satijalab/seurat",
    "GitHub": "satijalab/seurat",
    "CRAN": "Seurat",
    "Categories": ["SingleCell", "DimensionalityReduction"],
    "License": "GPL-3",
    "Added": "2016-09-08",
    "Updated": "2019-07-01",
    "Citations": 500,
    "Publications": [
      {"Title": "Spatial reconstruction", "DOI": "10.1038/nbt.3192", "Date": "2015-04-13", "Citations": 400}
    ]
  },
  {
    "Tool": "Scanpy",
    "Description": "Python toolkit",
    "Platform": "Python",
    "Code": "https://github.com/theislab/scanpy",
    "GitHub": "theislab/scanpy",
    "PyPI": "scanpy",
    "Categories": ["SingleCell", "Clustering"],
    "Added": "2017-03-01",
    "Updated": "2018-02-06",
    "Citations": 800,
    "Preprints": [
      {"Title": "Scanpy preprint", "DOI": "arxiv/1234.5678", "Citations": 12}
    ]
  },
  {
    "Tool": "ZINB-WaVE",
    "Description": "Zero-inflated negative binomial",
    "Platform": "R",
    "Categories": ["Normalisation"],
    "Added": "2017-05-01",
    "Updated": "2017-05-01",
    "Citations": 10
  }
]"#;

const CATEGORIES_JSON: &str = r#"[
  {
    "Category": "SingleCell",
    "Description": "Tools for single cells",
    "Tools": [{"Name": "Seurat", "CRAN": "Seurat"}, {"Name": "Scanpy", "PyPI": "scanpy"}]
  },
  {"Category": "Clustering", "Description": "Group cells", "Tools": [{"Name": "Scanpy"}]}
]"#;

const FAQS_JSON: &str = r#"[
  {"id": "add", "question": "How do I add a tool?", "answer": "Open an [issue](https://example.org/issues)."},
  {"id": "cite", "question": "How do I cite?", "answer": "See *the paper*."}
]"#;

const PLATFORMS_JSON: &str = r#"[{"Name": "R"}, {"Name": "Python"}]"#;

const TABLE_TSV: &str = "Name\tPlatform\nSeurat\tR\nScanpy\tPython\n";

const SEARCH_JSON: &str = r#"{"items": [{"forks": 567, "stargazers_count": 1234, "pushed_at": "2019-03-01T10:00:00Z"}]}"#;

fn spawn_catalog_server() -> (
    String,
    Arc<Mutex<Vec<String>>>,
    mpsc::Sender<()>,
    thread::JoinHandle<()>,
) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
    let addr = server.server_addr();
    let base_url = format!("http://{addr}");

    let searches = Arc::new(Mutex::new(Vec::new()));
    let searches_log = Arc::clone(&searches);
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let request = match server.recv_timeout(Duration::from_millis(50)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };

            let url = request.url().to_string();
            let (status, body) = match url.as_str() {
                "/data/tools.json" => (200, TOOLS_JSON),
                "/data/categories.json" => (200, CATEGORIES_JSON),
                u if u.starts_with("/api/search/repositories") => {
                    searches_log.lock().unwrap().push(u.to_owned());
                    if u.contains("satijalab/seurat") {
                        (200, SEARCH_JSON)
                    } else {
                        (200, r#"{"items": []}"#)
                    }
                }
                _ => (404, "not found"),
            };

            let _ = request.respond(
                tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                    ),
            );
        }
    });

    (base_url, searches, shutdown_tx, handle)
}

#[test]
fn tools_page_sorts_filters_and_enriches_fragment_panel() {
    let (base_url, searches, shutdown_tx, handle) = spawn_catalog_server();
    let temp = tempfile::TempDir::new().unwrap();
    let out = temp.path().join("tools.html");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolcatalog");
    cmd.env_remove("GITHUB_TOKEN")
        .args([
            "tools",
            "--data",
            &format!("{base_url}/data/tools.json"),
            "--out",
            out.to_str().unwrap(),
            "--url",
            "tools.html?sort=cites&cats=SingleCell#Seurat",
            "--enrich",
            "--github-api",
            &format!("{base_url}/api"),
        ])
        .assert()
        .success();

    let _ = shutdown_tx.send(());
    let _ = handle.join();

    let html = fs::read_to_string(&out).unwrap();

    let scanpy = html.find("<strong>1. </strong>Scanpy").expect("Scanpy first");
    let seurat = html.find("<strong>2. </strong>Seurat").expect("Seurat second");
    assert!(scanpy < seurat);
    assert!(!html.contains(r#"id="ZINB-WaVE""#));
    assert!(!html.contains("name-bookmarks"));

    assert!(html.contains(r#"<option value="cites" selected>"#));
    assert!(html.contains(r#"<a href="https://arxiv.org/abs/1234.5678">1234.5678</a>"#));
    assert!(html.contains(r#"<a href="https://doi.org/10.1038/nbt.3192">"#));
    assert!(html.contains(r##"<a href="categories.html#DimensionalityReduction">Dimensionality Reduction</a>"##));

    assert!(html.contains(r#"<div id="Seurat_c" class="panel-collapse collapse in">"#));
    assert!(html.contains(r#"<div id="Scanpy_c" class="panel-collapse collapse">"#));
    assert!(html.contains(r#"<span class="blue">1234</span>"#));
    assert!(html.contains(r#"<span class="commit-date red">March 2019</span>"#));
    // Scanpy was not expanded, so its badges stay on the sentinel text.
    assert!(html.contains(r#"<span class="commit-date blue">Unknown</span>"#));

    let searches = searches.lock().unwrap();
    assert_eq!(searches.len(), 1, "only the expanded panel is enriched");
    assert!(searches[0].contains("satijalab/seurat"));
}

#[test]
fn failed_enrichment_keeps_sentinels() {
    let temp = tempfile::TempDir::new().unwrap();
    let data = temp.path().join("tools.json");
    fs::write(&data, TOOLS_JSON).unwrap();
    let out = temp.path().join("tools.html");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolcatalog");
    cmd.args([
        "tools",
        "--data",
        data.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--url",
        "tools.html#Seurat",
        "--enrich",
        "--github-api",
        "http://127.0.0.1:9",
    ])
    .assert()
    .success()
    .stderr(predicate::str::contains("badge enrichment failed"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains(r#"<div id="Seurat_c" class="panel-collapse collapse in">"#));
    assert!(!html.contains(r#"<span class="blue">1234</span>"#));
    assert!(html.contains(r#"<span class="blue">N/A</span>"#));
}

#[test]
fn default_order_is_alphabetical_with_letter_buckets() {
    let temp = tempfile::TempDir::new().unwrap();
    let data = temp.path().join("tools.json");
    fs::write(&data, TOOLS_JSON).unwrap();
    let out = temp.path().join("tools.html");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolcatalog");
    cmd.args([
        "tools",
        "--data",
        data.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ])
    .assert()
    .success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains(r#"<div id="tools-list" class="name-sort">"#));
    assert!(html.contains(r##"<a href="#anchorS">S</a>"##));
    assert!(html.contains(r##"<a href="#anchorZ">Z</a>"##));
    assert!(!html.contains("<strong>1. </strong>"));
    let scanpy = html.find(r#"id="Scanpy""#).unwrap();
    let seurat = html.find(r#"id="Seurat""#).unwrap();
    assert!(scanpy < seurat);
}

#[test]
fn missing_data_renders_empty_list_and_succeeds() {
    let temp = tempfile::TempDir::new().unwrap();
    let out = temp.path().join("tools.html");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolcatalog");
    cmd.args([
        "tools",
        "--data",
        temp.path().join("missing.json").to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--sort",
        "cites",
    ])
    .assert()
    .success()
    .stderr(predicate::str::contains("rendering empty list"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains(r#"<div id="tools-list">"#));
    assert!(!html.contains("tool-container"));
}

#[test]
fn categories_faqs_and_table_render() {
    let temp = tempfile::TempDir::new().unwrap();
    let categories = temp.path().join("categories.json");
    let faqs = temp.path().join("faqs.json");
    let table = temp.path().join("table.tsv");
    fs::write(&categories, CATEGORIES_JSON).unwrap();
    fs::write(&faqs, FAQS_JSON).unwrap();
    fs::write(&table, TABLE_TSV).unwrap();

    let categories_out = temp.path().join("categories.html");
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolcatalog");
    cmd.args([
        "categories",
        "--data",
        categories.to_str().unwrap(),
        "--out",
        categories_out.to_str().unwrap(),
        "--url",
        "categories.html#Clustering",
    ])
    .assert()
    .success();
    let html = fs::read_to_string(&categories_out).unwrap();
    assert!(html.contains(r##"<a href="tools.html#Seurat">Seurat</a>"##));
    assert!(html.contains(r#"<div id="Clustering_c" class="panel-collapse collapse in">"#));
    assert!(html.contains(r#"<div id="SingleCell_c" class="panel-collapse collapse">"#));
    assert!(html.contains("Single Cell"));

    let faqs_out = temp.path().join("faq.html");
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolcatalog");
    cmd.args([
        "faqs",
        "--data",
        faqs.to_str().unwrap(),
        "--out",
        faqs_out.to_str().unwrap(),
    ])
    .assert()
    .success();
    let html = fs::read_to_string(&faqs_out).unwrap();
    assert!(html.contains(r#"<a href="https://example.org/issues">issue</a>"#));
    assert!(html.contains("<em>the paper</em>"));

    let table_out = temp.path().join("table.html");
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolcatalog");
    cmd.args([
        "table",
        "--data",
        table.to_str().unwrap(),
        "--out",
        table_out.to_str().unwrap(),
    ])
    .assert()
    .success();
    assert_eq!(
        fs::read_to_string(&table_out).unwrap(),
        "<tbody><tr><td>Seurat</td><td>R</td></tr><tr><td>Scanpy</td><td>Python</td></tr></tbody>"
    );
}

#[test]
fn stats_prints_counts_as_json() {
    let (base_url, _searches, shutdown_tx, handle) = spawn_catalog_server();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolcatalog");
    cmd.args([
        "stats",
        "--tools",
        &format!("{base_url}/data/tools.json"),
        "--categories",
        &format!("{base_url}/data/categories.json"),
    ])
    .assert()
    .success()
    .stdout(r#"{"tools":3,"categories":0}"#.to_owned() + "\n");

    let _ = shutdown_tx.send(());
    let _ = handle.join();
}

#[test]
fn build_renders_every_configured_page() {
    let temp = tempfile::TempDir::new().unwrap();
    let data_dir = temp.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("tools.json"), TOOLS_JSON).unwrap();
    fs::write(data_dir.join("categories.json"), CATEGORIES_JSON).unwrap();
    fs::write(data_dir.join("faqs.json"), FAQS_JSON).unwrap();
    fs::write(data_dir.join("platforms.json"), PLATFORMS_JSON).unwrap();
    fs::write(data_dir.join("table.tsv"), TABLE_TSV).unwrap();

    let config = temp.path().join("catalog.yaml");
    fs::write(
        &config,
        "tools: data/tools.json\ncategories: data/categories.json\nfaqs: data/faqs.json\nplatforms: data/platforms.json\ntable: data/table.tsv\nsort: updated\n",
    )
    .unwrap();

    let site = temp.path().join("site");
    let build = || {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolcatalog");
        cmd.args([
            "build",
            "--config",
            config.to_str().unwrap(),
            "--out",
            site.to_str().unwrap(),
        ]);
        cmd
    };

    build().assert().success();

    for name in [
        "tools-list.html",
        "categories-list.html",
        "faqs-list.html",
        "platforms-list.html",
        "software-table.html",
        "stats.json",
    ] {
        assert!(site.join(name).is_file(), "missing {name}");
    }

    let tools = fs::read_to_string(site.join("tools-list.html")).unwrap();
    let seurat = tools.find("<strong>1. </strong>Seurat").expect("Seurat first");
    let scanpy = tools.find("<strong>2. </strong>Scanpy").expect("Scanpy second");
    assert!(seurat < scanpy);

    assert_eq!(
        fs::read_to_string(site.join("platforms-list.html")).unwrap(),
        r#"<ul id="platform-list"><li><h2>R</h2></li><li><h2>Python</h2></li></ul>"#
    );

    let stats: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(site.join("stats.json")).unwrap()).unwrap();
    assert_eq!(stats["tools"], 3);

    build()
        .assert()
        .failure()
        .stderr(predicate::str::contains("output directory already exists"));
}
