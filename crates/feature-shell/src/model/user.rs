use platform_kit::ResourceSchema;
use serde::{Deserialize, Serialize};

/// A user known to the BFF. Also used for the signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

impl ResourceSchema for User {
    type Id = i64;
    const COLLECTION: &'static str = "users";

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

impl Address {
    /// Single-line form, e.g. `Kulas Light, Apt. 556, Gwenborough 92998-3874`.
    pub fn one_line(&self) -> String {
        format!("{}, {}, {} {}", self.street, self.suite, self.city, self.zipcode)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

/// Coordinates as the BFF sends them: decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub lat: String,
    pub lng: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEANNE: &str = r#"{
        "id": 1,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org",
        "company": {
            "name": "Romaguera-Crona",
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    }"#;

    #[test]
    fn decodes_nested_records_without_ids() {
        let user = User::decode(LEANNE.as_bytes()).unwrap();
        assert_eq!(user.id(), Some(1));
        assert_eq!(user.address.id, None);
        assert_eq!(user.address.geo.lat, "-37.3159");
        assert_eq!(user.company.catch_phrase, "Multi-layered client-server neural-net");
        assert_eq!(
            user.address.one_line(),
            "Kulas Light, Apt. 556, Gwenborough 92998-3874"
        );
    }

    #[test]
    fn absent_nested_ids_are_omitted_on_encode() {
        let user = User::decode(LEANNE.as_bytes()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&user.encode().unwrap()).unwrap();

        assert!(json["address"].get("id").is_none());
        assert!(json["address"]["geo"].get("id").is_none());
        assert!(json["company"].get("id").is_none());
        assert_eq!(json["company"]["catchPhrase"], "Multi-layered client-server neural-net");
    }

    #[test]
    fn present_nested_ids_survive_encode() {
        let mut user = User::decode(LEANNE.as_bytes()).unwrap();
        user.company.id = Some(9);
        let again = User::decode(&user.encode().unwrap()).unwrap();
        assert_eq!(again.company.id, Some(9));
    }
}
