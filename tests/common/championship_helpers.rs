use reqwest::{Client, Response};
use serde_json::{json, Value};

/// One published result in the wire format
pub fn result_json(
    group: &str,
    home: &str,
    away: &str,
    matchday: i32,
    kickoff_at: &str,
    score: &str,
) -> Value {
    json!({
        "leagueTitle": "UEFA Champions League",
        "group": group,
        "homeTeam": home,
        "awayTeam": away,
        "matchday": matchday,
        "kickoffAt": kickoff_at,
        "score": score
    })
}

/// First two matchdays of two Champions League groups
pub fn sample_results() -> Value {
    json!([
        result_json("A", "Benfica", "CSKA Moscow", 1, "2017-09-12T20:45:00", "1:2"),
        result_json("A", "Manchester United", "Basel", 1, "2017-09-12T20:45:00", "3:0"),
        result_json("B", "Bayern Munich", "Anderlecht", 1, "2017-09-12T20:45:00", "3:0"),
        result_json("B", "Celtic", "PSG", 1, "2017-09-12T20:45:00", "0:5"),
        result_json("A", "Basel", "Benfica", 2, "2017-09-27T20:45:00", "5:0"),
        result_json("A", "CSKA Moscow", "Manchester United", 2, "2017-09-27T18:00:00", "1:4"),
        result_json("B", "Anderlecht", "Celtic", 2, "2017-09-27T20:45:00", "0:3"),
        result_json("B", "PSG", "Bayern Munich", 2, "2017-09-27T20:45:00", "3:0")
    ])
}

pub async fn publish(client: &Client, app_address: &str, body: &Value) -> Response {
    client
        .post(&format!("{}/api/fixture/result/publish", app_address))
        .json(body)
        .send()
        .await
        .expect("Failed to execute publish request.")
}

pub async fn filter(client: &Client, app_address: &str, criteria: &Value) -> Value {
    let response = client
        .post(&format!("{}/api/fixture/result/filter", app_address))
        .json(criteria)
        .send()
        .await
        .expect("Failed to execute filter request.");
    assert_eq!(200, response.status().as_u16());
    response.json().await.expect("Failed to parse filter response")
}

/// The standings row of `team` in a table
pub fn standing<'a>(table: &'a Value, team: &str) -> &'a Value {
    table["standing"]
        .as_array()
        .expect("standing is not an array")
        .iter()
        .find(|row| row["team"] == team)
        .unwrap_or_else(|| panic!("{} missing from table", team))
}
