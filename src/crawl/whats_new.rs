// src/crawl/whats_new.rs

use anyhow::{Context, Result};
use scraper::Html;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::Settings;
use crate::error::ScrapeError;
use crate::fetch::{fetch_document, require_document, Fetcher};
use crate::html::{find_all, find_tag, text_of};
use crate::output::Table;

pub const HEADER: [&str; 3] = ["Ссылка на статью", "Заголовок", "Редактор, автор"];

/// Links to every "What's New In Python X.Y" article, resolved against `base`.
fn article_links(doc: &Html, base: &Url) -> Result<Vec<Url>> {
    let main = find_tag(doc.root_element(), "section", &[("id", "what-s-new-in-python")])?;
    let wrapper = find_tag(main, "div", &[("class", "toctree-wrapper")])?;

    let mut links = Vec::new();
    for item in find_all(wrapper, "li", &[("class", "toctree-l1")])? {
        let a = find_tag(item, "a", &[])?;
        let href = a.value().attr("href").ok_or_else(|| ScrapeError::TagNotFound {
            tag: "a".to_string(),
            attrs: "href".to_string(),
        })?;
        links.push(base.join(href).with_context(|| format!("joining {} onto {}", href, base))?);
    }
    Ok(links)
}

/// Title and editor/author line of one article.
fn article_summary(doc: &Html) -> Result<(String, String), ScrapeError> {
    let root = doc.root_element();
    let h1 = find_tag(root, "h1", &[])?;
    let dl = find_tag(root, "dl", &[])?;
    Ok((text_of(h1), text_of(dl).replace('\n', " ")))
}

#[instrument(level = "info", skip_all)]
pub async fn whats_new<F: Fetcher>(fetcher: &F, settings: &Settings) -> Result<Table> {
    let whats_new_url = settings.main_doc_url.join("whatsnew/")?;
    let links = {
        let doc = require_document(fetcher, &whats_new_url).await?;
        article_links(&doc, &whats_new_url)?
    };
    info!(articles = links.len(), "collected article links");

    let mut rows = Vec::with_capacity(links.len());
    for link in links {
        let Some(doc) = fetch_document(fetcher, &link).await else {
            continue;
        };
        let (title, editor) =
            article_summary(&doc).with_context(|| format!("reading article {}", link))?;
        debug!(%link, %title, "article");
        rows.push(vec![link.to_string(), title, editor]);
    }
    Ok(Table::new(HEADER, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;

    const INDEX: &str = r#"
        <section id="what-s-new-in-python"><h1>What's New in Python</h1>
          <div class="toctree-wrapper compound"><ul>
            <li class="toctree-l1"><a class="reference internal" href="3.13.html">What's New In Python 3.13</a>
              <ul><li class="toctree-l2"><a href="3.13.html#summary">Summary</a></li></ul></li>
            <li class="toctree-l1"><a class="reference internal" href="3.12.html">What's New In Python 3.12</a></li>
            <li class="toctree-l1"><a class="reference internal" href="3.11.html">What's New In Python 3.11</a></li>
          </ul></div>
        </section>"#;

    fn settings() -> Settings {
        Settings::new(
            Url::parse("https://docs.python.org/3/").unwrap(),
            Url::parse("https://peps.python.org/").unwrap(),
            std::env::temp_dir(),
        )
    }

    #[tokio::test]
    async fn test_collects_articles_and_skips_unreachable() {
        let fetcher = StaticFetcher::new()
            .with_page("https://docs.python.org/3/whatsnew/", INDEX)
            .with_page(
                "https://docs.python.org/3/whatsnew/3.13.html",
                "<h1>What’s New In Python 3.13</h1><dl><dt>Editors</dt>\n<dd>Adam Turner</dd></dl>",
            )
            .with_page(
                "https://docs.python.org/3/whatsnew/3.11.html",
                "<h1>What’s New In Python 3.11</h1><dl><dt>Editor</dt>\n<dd>Pablo Galindo Salgado</dd></dl>",
            );

        let table = whats_new(&fetcher, &settings()).await.unwrap();

        assert_eq!(table.header, HEADER.map(String::from).to_vec());
        assert_eq!(
            table.rows,
            vec![
                vec![
                    "https://docs.python.org/3/whatsnew/3.13.html".to_string(),
                    "What’s New In Python 3.13".to_string(),
                    "Editors Adam Turner".to_string(),
                ],
                vec![
                    "https://docs.python.org/3/whatsnew/3.11.html".to_string(),
                    "What’s New In Python 3.11".to_string(),
                    "Editor Pablo Galindo Salgado".to_string(),
                ],
            ]
        );
    }

    #[tokio::test]
    async fn test_changed_layout_is_fatal() {
        let fetcher = StaticFetcher::new()
            .with_page("https://docs.python.org/3/whatsnew/", "<section id=\"other\"></section>");
        let err = whats_new(&fetcher, &settings()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScrapeError>(),
            Some(ScrapeError::TagNotFound { .. })
        ));
    }
}
