use crate::core::listing::parse_municipality_list;
use crate::core::markup::Document;
use crate::core::pivot::{to_wide_table, write_delimited};
use crate::core::tally::extract_party_tally;
use crate::core::turnout::extract_turnout;
use crate::core::{
    ConfigProvider, Fetcher, Harvest, MunicipalityRef, MunicipalityResult, Pipeline, Storage,
    WideTable,
};
use crate::utils::error::{EtlError, Result};

/// Listing page -> detail pages -> one wide CSV.
///
/// Detail pages are fetched one at a time, in listing order.
pub struct ElectionPipeline<F: Fetcher, S: Storage, C: ConfigProvider> {
    fetcher: F,
    storage: S,
    config: C,
}

impl<F: Fetcher, S: Storage, C: ConfigProvider> ElectionPipeline<F, S, C> {
    pub fn new(fetcher: F, storage: S, config: C) -> Self {
        Self {
            fetcher,
            storage,
            config,
        }
    }

    async fn list_municipalities(&self) -> Result<Vec<MunicipalityRef>> {
        let source_url = self.config.source_url();
        tracing::info!("Downloading listing from: {}", source_url);

        let markup = self.fetcher.fetch(source_url).await?;
        let municipalities = parse_municipality_list(&markup, &self.config.settings().base_url);

        if municipalities.is_empty() {
            return Err(EtlError::EmptyResult {
                url: source_url.to_string(),
            });
        }
        Ok(municipalities)
    }
}

/// Turnout and party tally of one detail page.
pub fn process_detail_page(municipality: MunicipalityRef, markup: &str) -> MunicipalityResult {
    let doc = Document::parse(markup);
    let turnout = extract_turnout(&doc);
    let tally = extract_party_tally(&doc);

    if turnout.is_empty() {
        tracing::warn!(
            "No turnout figures for {} {}",
            municipality.code,
            municipality.name
        );
    }

    MunicipalityResult {
        municipality,
        turnout,
        tally,
    }
}

#[async_trait::async_trait]
impl<F: Fetcher, S: Storage, C: ConfigProvider> Pipeline for ElectionPipeline<F, S, C> {
    async fn extract(&self) -> Result<Harvest> {
        let municipalities = self.list_municipalities().await?;
        let total = municipalities.len();
        tracing::info!("Found {} municipalities", total);

        let mut harvest = Harvest::default();
        for (index, municipality) in municipalities.into_iter().enumerate() {
            tracing::info!(
                "[{}/{}] Downloading {} {} from {}",
                index + 1,
                total,
                municipality.code,
                municipality.name,
                municipality.detail_url
            );

            let markup = self.fetcher.fetch(&municipality.detail_url).await?;
            let result = process_detail_page(municipality, &markup);
            tracing::debug!(
                "{}: {} parties",
                result.municipality.code,
                result.tally.len()
            );
            harvest.push(result);
        }

        Ok(harvest)
    }

    async fn transform(&self, harvest: Harvest) -> Result<WideTable> {
        Ok(to_wide_table(&harvest))
    }

    async fn load(&self, table: WideTable) -> Result<String> {
        let output_path = self.config.output_path();
        tracing::info!("Saving to file: {}", output_path);

        let delimiter = self.config.settings().delimiter_byte()?;
        let data = write_delimited(&table, delimiter)?;

        tracing::debug!("Writing {} bytes to storage", data.len());
        self.storage.write_file(output_path, &data).await?;

        Ok(output_path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const BASE: &str = "https://volby.cz/pls/ps2017nss/";
    const LISTING_URL: &str = "https://volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=12&xnumnuts=7103";

    #[derive(Clone, Default)]
    struct MockFetcher {
        pages: HashMap<String, String>,
        requested: Arc<Mutex<Vec<String>>>,
    }

    impl MockFetcher {
        fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        async fn requested(&self) -> Vec<String> {
            self.requested.lock().await.clone()
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.requested.lock().await.push(url.to_string());
            match self.pages.get(url) {
                Some(body) => Ok(body.clone()),
                None => Err(EtlError::Config {
                    message: format!("no mock page for {}", url),
                }),
            }
        }
    }

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        source_url: String,
        output_path: String,
        settings: Settings,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                source_url: LISTING_URL.to_string(),
                output_path: "vysledky.csv".to_string(),
                settings: Settings::default(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn source_url(&self) -> &str {
            &self.source_url
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn settings(&self) -> &Settings {
            &self.settings
        }
    }

    fn listing(rows: &[(&str, &str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(code, name, href)| {
                format!(
                    r#"<tr><td class="cislo"><a href="{href}">{code}</a></td><td>{name}</td><td><a href="{href}">X</a></td></tr>"#
                )
            })
            .collect();
        format!(
            "<html><body><table><tr><th>číslo</th><th>název</th><th>výběr</th></tr>{}</table></body></html>",
            body
        )
    }

    fn detail(turnout: (&str, &str, &str), parties: &[(&str, &str)]) -> String {
        let rows: String = parties
            .iter()
            .enumerate()
            .map(|(i, (name, votes))| {
                format!("<tr><td>{}</td><td>{}</td><td>{}</td><td>1,0</td></tr>", i + 1, name, votes)
            })
            .collect();
        format!(
            r#"<html><body>
            <table id="ps311_t1"><tr><td>{}</td><td>{}</td><td>{}</td></tr></table>
            <table><tr><th>Strana</th><th>název</th><th>hlasy</th><th>%</th></tr>{}</table>
            </body></html>"#,
            turnout.0, turnout.1, turnout.2, rows
        )
    }

    #[tokio::test]
    async fn test_extract_collects_every_municipality_in_order() {
        let fetcher = MockFetcher::default()
            .with_page(
                LISTING_URL,
                &listing(&[("500054", "Bohuňovice", "d1"), ("500062", "Bouzov", "d2")]),
            )
            .with_page(&format!("{BASE}d1"), &detail(("10000", "9500", "9400"), &[("ANO", "120")]))
            .with_page(&format!("{BASE}d2"), &detail(("800", "500", "498"), &[("ODS", "80")]));

        let pipeline = ElectionPipeline::new(fetcher.clone(), MockStorage::new(), MockConfig::new());
        let harvest = pipeline.extract().await.unwrap();

        assert_eq!(harvest.results.len(), 2);
        assert_eq!(harvest.results[0].municipality.code, "500054");
        assert_eq!(harvest.results[0].turnout.registered_voters, "10000");
        assert_eq!(harvest.results[1].tally["ODS"], "80");
        assert_eq!(harvest.parties.sorted().collect::<Vec<_>>(), vec!["ANO", "ODS"]);
        assert_eq!(
            fetcher.requested().await,
            vec![LISTING_URL.to_string(), format!("{BASE}d1"), format!("{BASE}d2")]
        );
    }

    #[tokio::test]
    async fn test_empty_listing_is_empty_result_error() {
        let fetcher = MockFetcher::default().with_page(LISTING_URL, "<html><body></body></html>");
        let pipeline = ElectionPipeline::new(fetcher, MockStorage::new(), MockConfig::new());

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EtlError::EmptyResult { .. }));
    }

    #[tokio::test]
    async fn test_failed_detail_fetch_aborts_run() {
        let fetcher = MockFetcher::default()
            .with_page(
                LISTING_URL,
                &listing(&[("500054", "Bohuňovice", "d1"), ("500062", "Bouzov", "missing")]),
            )
            .with_page(&format!("{BASE}d1"), &detail(("1", "1", "1"), &[]));

        let pipeline = ElectionPipeline::new(fetcher, MockStorage::new(), MockConfig::new());
        assert!(pipeline.extract().await.is_err());
    }

    #[test]
    fn test_detail_without_turnout_still_yields_row() {
        let result = process_detail_page(
            MunicipalityRef {
                code: "500089".to_string(),
                name: "Bystrovany".to_string(),
                detail_url: format!("{BASE}d"),
            },
            "<html><body><p>bez dat</p></body></html>",
        );

        assert!(result.turnout.is_empty());
        assert!(result.tally.is_empty());
    }

    #[tokio::test]
    async fn test_load_writes_semicolon_csv() {
        let storage = MockStorage::new();
        let pipeline = ElectionPipeline::new(MockFetcher::default(), storage.clone(), MockConfig::new());

        let table = WideTable {
            header: vec!["code".to_string(), "name".to_string()],
            rows: vec![vec!["500054".to_string(), "Bohuňovice".to_string()]],
        };

        let path = pipeline.load(table).await.unwrap();

        assert_eq!(path, "vysledky.csv");
        let written = String::from_utf8(storage.get_file("vysledky.csv").await.unwrap()).unwrap();
        assert_eq!(written.lines().collect::<Vec<_>>(), vec!["code;name", "500054;Bohuňovice"]);
    }

    #[tokio::test]
    async fn test_full_run_fills_missing_parties_with_empty_cells() {
        let fetcher = MockFetcher::default()
            .with_page(LISTING_URL, &listing(&[("1", "A", "a"), ("2", "B", "b")]))
            .with_page(&format!("{BASE}a"), &detail(("10", "9", "8"), &[("ANO", "120")]))
            .with_page(&format!("{BASE}b"), &detail(("20", "19", "18"), &[("ODS", "80")]));
        let storage = MockStorage::new();
        let pipeline = ElectionPipeline::new(fetcher, storage.clone(), MockConfig::new());

        let harvest = pipeline.extract().await.unwrap();
        let table = pipeline.transform(harvest).await.unwrap();
        pipeline.load(table).await.unwrap();

        let written = String::from_utf8(storage.get_file("vysledky.csv").await.unwrap()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "code;name;registered_voters;envelopes;valid_votes;ANO;ODS");
        assert_eq!(lines[1], "1;A;10;9;8;120;");
        assert_eq!(lines[2], "2;B;20;19;18;;80");
    }
}
