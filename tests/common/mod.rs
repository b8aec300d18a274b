//! Shared fixtures for the end-to-end scraper tests.

use std::path::Path;

use mockito::{Mock, Server};
use pydocs_scraper::{ScrapingContext, config::ScrapingConfig};

/// Context whose docs root is `<server>/3/` and PEP index `<server>/`, with
/// every file written under `base_dir`.
#[allow(dead_code)]
pub fn context_for(server: &Server, base_dir: &Path) -> ScrapingContext {
    let config = ScrapingConfig::for_sites(
        &format!("{}/3/", server.url()),
        &format!("{}/", server.url()),
        base_dir,
    )
    .unwrap();
    ScrapingContext::from_config(config).unwrap()
}

#[allow(dead_code)]
pub async fn html_mock(server: &mut Server, path: &str, html: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create_async()
        .await
}

#[allow(dead_code)]
pub async fn error_mock(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}

#[allow(dead_code)]
pub fn whats_new_index(hrefs: &[&str]) -> String {
    let items = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<li class="toctree-l1"><a class="reference internal" href="{href}">What's New</a></li>"#
            )
        })
        .collect::<String>();
    format!(
        r#"<html><body><section id="what-s-new-in-python"><h1>What's New in Python</h1>
        <div class="toctree-wrapper compound"><ul>{items}</ul></div></section></body></html>"#
    )
}

#[allow(dead_code)]
pub fn whats_new_article(version: &str, editor: &str) -> String {
    format!(
        r#"<html><body><section><h1>What's New In Python {version}</h1>
        <dl class="field-list simple"><dt>Editor<span class="colon">:</span></dt>
        <dd><p>{editor}</p></dd></dl></section></body></html>"#
    )
}

#[allow(dead_code)]
pub fn pep_index(rows: &[(&str, u32)]) -> String {
    let rows = rows
        .iter()
        .map(|(kind_and_status, number)| {
            format!(
                r#"<tr><td><abbr>{kind_and_status}</abbr></td>
                <td class="num"><a class="pep reference internal" href="pep-{number:04}/">{number}</a></td>
                <td>Title</td></tr>"#
            )
        })
        .collect::<String>();
    format!(
        r#"<html><body><section id="numerical-index"><table class="pep-zero-table docutils">
        <tbody>{rows}</tbody></table></section></body></html>"#
    )
}

#[allow(dead_code)]
pub fn pep_page(status: &str) -> String {
    format!(
        r#"<html><body><dl class="rfc2822 field-list simple">
        <dt class="field-odd">Author<span class="colon">:</span></dt><dd class="field-odd">Someone</dd>
        <dt class="field-even">Status<span class="colon">:</span></dt>
        <dd class="field-even"><abbr title="status">{status}</abbr></dd>
        </dl></body></html>"#
    )
}
