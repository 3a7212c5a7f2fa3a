//! WikiTree API client.
//! POSTs form-encoded actions to the API endpoint and turns the `getPerson`
//! result into a `Person` graph. One request per call: no retry and no timeout,
//! so a network failure goes straight back to the caller.
//! The client keeps a cookie store so an authenticated session rides along.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::person::Person;

// *************** Response Types ***************

/// One element of the array returned by `getPerson`.
#[derive(Debug, Deserialize)]
struct GetPersonResult {
    #[serde(default)]
    person: Option<Value>,
    #[serde(default)]
    status: Value,
}

// *************** Public API ***************

#[derive(Debug, Clone)]
pub struct TreeApi {
    client: Client,
    api_url: String,
}

impl TreeApi {
    pub fn new(api_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(config.api_url.clone())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetches the profile `key` (a WikiTree id or name such as "Windsor-1")
    /// with the requested `fields`. Nested `Parents`/`Children` come back as
    /// `Person` values too.
    pub async fn get_person<S: AsRef<str>>(&self, key: &str, fields: &[S]) -> Result<Person, ApiError> {
        let fields = fields.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        let params = [
            ("action", "getPerson".to_string()),
            ("key", key.to_string()),
            ("fields", fields),
            ("resolveRedirect", "1".to_string()),
        ];

        let result = self.post_to_api(&params).await?;
        person_from_result(key, result)
    }

    /// Fetches `key` and then, one request per parent, its ancestors up to
    /// `generations` back. Each fetched parent is attached with
    /// `set_father`/`set_mother`, so the result is a pedigree rooted at `key`.
    pub async fn get_ancestors<S: AsRef<str>>(
        &self,
        key: &str,
        fields: &[S],
        generations: usize,
    ) -> Result<Person, ApiError> {
        let mut root = self.get_person(key, fields).await?;
        self.fill_parents(&mut root, fields, generations).await?;
        Ok(root)
    }

    async fn fill_parents<S: AsRef<str>>(
        &self,
        person: &mut Person,
        fields: &[S],
        generations: usize,
    ) -> Result<(), ApiError> {
        if generations == 0 {
            return Ok(());
        }

        if let Some(id) = person.father_id().filter(|id| id.is_set()).cloned() {
            let mut father = self.get_person(id.as_str(), fields).await?;
            Box::pin(self.fill_parents(&mut father, fields, generations - 1)).await?;
            person.set_father(father);
        }
        if let Some(id) = person.mother_id().filter(|id| id.is_set()).cloned() {
            let mut mother = self.get_person(id.as_str(), fields).await?;
            Box::pin(self.fill_parents(&mut mother, fields, generations - 1)).await?;
            person.set_mother(mother);
        }
        Ok(())
    }

    /// Sends one form-encoded POST to the API and returns the decoded JSON body.
    pub async fn post_to_api(&self, params: &[(&str, String)]) -> Result<Value, ApiError> {
        tracing::debug!(url = %self.api_url, ?params, "POST to WikiTree API");

        let response = self.client.post(&self.api_url).form(params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

// *************** Internal Functions ***************

/// Picks `result[0].person` out of a `getPerson` response.
fn person_from_result(key: &str, result: Value) -> Result<Person, ApiError> {
    let results: Vec<GetPersonResult> = serde_json::from_value(result)?;
    let first = results.into_iter().next().ok_or(ApiError::EmptyResponse)?;

    match first.person {
        Some(person) => Ok(Person::from_value(person)?),
        None => Err(ApiError::MissingPerson {
            key: key.to_string(),
            status: status_text(&first.status),
        }),
    }
}

fn status_text(status: &Value) -> String {
    match status {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// *************** Tests ***************

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Read;
    use std::sync::mpsc;
    use std::thread;

    /// Serves exactly one request with `body`/`status` and hands back what was posted.
    fn serve_once(status: u16, body: &str) -> (String, mpsc::Receiver<String>) {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("Failed to start test server");
        let port = server.server_addr().to_ip().unwrap().port();
        let url = format!("http://127.0.0.1:{}/api.php", port);

        let (posted_tx, posted_rx) = mpsc::channel();
        let body = body.to_string();
        thread::spawn(move || {
            if let Ok(mut request) = server.recv() {
                let mut posted = String::new();
                let _ = request.as_reader().read_to_string(&mut posted);
                let _ = posted_tx.send(posted);
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                            .unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        (url, posted_rx)
    }

    /// Serves `getPerson` for every key in `people` until the test ends.
    fn serve_people(people: Vec<(&str, serde_json::Value)>) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("Failed to start test server");
        let port = server.server_addr().to_ip().unwrap().port();
        let people: Vec<(String, serde_json::Value)> =
            people.into_iter().map(|(k, v)| (format!("key={k}&"), v)).collect();

        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut posted = String::new();
                let _ = request.as_reader().read_to_string(&mut posted);
                let body = people
                    .iter()
                    .find(|(key, _)| posted.contains(key.as_str()))
                    .map(|(_, person)| json!([{ "status": 0, "person": person }]))
                    .unwrap_or_else(|| json!([{ "status": "Illegal key." }]));
                let _ = request.respond(tiny_http::Response::from_string(body.to_string()));
            }
        });

        format!("http://127.0.0.1:{}/api.php", port)
    }

    #[test]
    fn test_person_from_result() {
        let result = json!([{ "user_id": 32, "status": 0, "person": { "Id": 32, "Name": "Windsor-1" } }]);
        let person = person_from_result("Windsor-1", result).unwrap();
        assert_eq!(person.name(), Some("Windsor-1"));
    }

    #[test]
    fn test_person_from_result_without_person() {
        let result = json!([{ "status": "Illegal key." }]);
        let err = person_from_result("nope", result).unwrap_err();
        match err {
            ApiError::MissingPerson { key, status } => {
                assert_eq!(key, "nope");
                assert_eq!(status, "Illegal key.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_person_from_empty_result() {
        let err = person_from_result("x", json!([])).unwrap_err();
        assert!(matches!(err, ApiError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_get_person_posts_form_and_builds_graph() {
        let body = json!([{
            "status": 0,
            "person": {
                "Id": 1, "Name": "Doe-1", "Father": 2, "Mother": 0,
                "Parents": { "2": { "Id": 2, "Name": "Doe-2" } }
            }
        }])
        .to_string();
        let (url, posted) = serve_once(200, &body);

        let api = TreeApi::new(url).unwrap();
        let person = api.get_person("Doe-1", &["Id", "Name", "Parents"]).await.unwrap();

        assert_eq!(person.father().and_then(Person::name), Some("Doe-2"));
        assert!(person.mother().is_none());

        let posted = posted.recv().unwrap();
        assert!(posted.contains("action=getPerson"));
        assert!(posted.contains("key=Doe-1"));
        assert!(posted.contains("fields=Id%2CName%2CParents"));
        assert!(posted.contains("resolveRedirect=1"));
    }

    #[tokio::test]
    async fn test_get_person_http_error() {
        let (url, _posted) = serve_once(500, "boom");
        let api = TreeApi::new(url).unwrap();
        let err = api.get_person("Doe-1", &["Id"]).await.unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_get_person_connection_refused() {
        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let api = TreeApi::new(format!("http://127.0.0.1:{}/api.php", port)).unwrap();
        let err = api.get_person("Doe-1", &["Id"]).await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
    }

    #[tokio::test]
    async fn test_get_ancestors_builds_pedigree() {
        let url = serve_people(vec![
            ("1", json!({ "Id": 1, "Name": "Doe-1", "Father": 2, "Mother": 3 })),
            ("2", json!({ "Id": 2, "Name": "Doe-2", "Father": 4, "Mother": 0 })),
            ("3", json!({ "Id": 3, "Name": "Roe-3", "Father": 0, "Mother": 0 })),
            ("4", json!({ "Id": 4, "Name": "Doe-4", "Father": 0, "Mother": 0 })),
        ]);
        let api = TreeApi::new(url).unwrap();

        let root = api.get_ancestors("1", &["Id", "Name", "Father", "Mother"], 2).await.unwrap();
        let names: Vec<(usize, &str)> = root
            .ancestors(10)
            .into_iter()
            .map(|(generation, p)| (generation, p.name().unwrap()))
            .collect();
        assert_eq!(names, vec![(1, "Doe-2"), (1, "Roe-3"), (2, "Doe-4")]);

        let shallow = api.get_ancestors("1", &["Id", "Name", "Father", "Mother"], 1).await.unwrap();
        assert_eq!(shallow.ancestors(10).len(), 2);
    }

    #[tokio::test]
    async fn test_get_ancestors_propagates_missing_parent() {
        let url = serve_people(vec![("1", json!({ "Id": 1, "Father": 99 }))]);
        let api = TreeApi::new(url).unwrap();
        let err = api.get_ancestors("1", &["Id"], 3).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingPerson { key, .. } if key == "99"));
    }

    #[tokio::test]
    #[ignore = "requires network access to api.wikitree.com"]
    async fn test_real_api_call() {
        // Run with: cargo test test_real_api_call -- --ignored
        let api = TreeApi::from_config(&AppConfig::default()).unwrap();
        let person = api.get_person("Windsor-1", &AppConfig::default().fields).await;
        println!("Result: {:?}", person);
        assert!(person.is_ok());
    }
}
