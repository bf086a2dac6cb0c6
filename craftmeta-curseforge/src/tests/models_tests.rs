use super::*;
use serde_json::json;

fn file(id: u64, release_type: u32, date: &str) -> serde_json::Value {
    json!({
        "id": id,
        "gameId": 432,
        "modId": 238222,
        "isAvailable": true,
        "displayName": format!("jei-{}", id),
        "fileName": format!("jei-{}.jar", id),
        "releaseType": release_type,
        "fileStatus": 4,
        "hashes": [
            { "value": "da39a3ee5e6b4b0d3255bfef95601890afd80709", "algo": 1 },
            { "value": "d41d8cd98f00b204e9800998ecf8427e", "algo": 2 }
        ],
        "fileDate": date,
        "fileLength": 1536,
        "downloadCount": 10,
        "downloadUrl": null,
        "gameVersions": ["1.20.1", "Forge"],
        "dependencies": [ { "modId": 1, "relationType": 3 } ],
        "modules": [ { "name": "META-INF", "fingerprint": 1 } ],
        "fileFingerprint": 12345
    })
}

fn mod_json() -> serde_json::Value {
    json!({
        "id": 238222,
        "gameId": 432,
        "name": "Just Enough Items (JEI)",
        "slug": "jei",
        "links": { "websiteUrl": "https://www.curseforge.com/minecraft/mc-mods/jei", "wikiUrl": null },
        "summary": "View Items and Recipes",
        "status": 4,
        "downloadCount": 345_678_901u64,
        "isFeatured": false,
        "primaryCategoryId": 421,
        "categories": [
            { "id": 421, "gameId": 432, "name": "API and Library", "slug": "library-api",
              "dateModified": "2014-05-08T17:44:39.057Z" }
        ],
        "classId": 6,
        "authors": [ { "id": 1, "name": "mezz", "url": "https://www.curseforge.com/members/mezz" } ],
        "logo": { "id": 1, "modId": 238222, "title": "logo", "description": "",
                  "thumbnailUrl": "https://media.forgecdn.net/thumb.png", "url": "https://media.forgecdn.net/logo.png" },
        "screenshots": [],
        "mainFileId": 3,
        "latestFiles": [
            file(1, 1, "2023-01-15T10:30:45.123Z"),
            file(2, 2, "2023-03-01T00:00:00Z"),
            file(3, 1, "2023-02-01T08:00:00.5Z")
        ],
        "latestFilesIndexes": [
            { "gameVersion": "1.20.1", "fileId": 3, "filename": "jei-3.jar", "releaseType": 1, "modLoader": 1 },
            { "gameVersion": "1.20.1", "fileId": 2, "filename": "jei-2.jar", "releaseType": 2, "modLoader": 4 },
            { "gameVersion": "1.19.2", "fileId": 1, "filename": "jei-1.jar", "releaseType": 1 }
        ],
        "dateCreated": "2015-11-23T06:14:39.97Z",
        "dateModified": "2023-03-01T00:00:00",
        "dateReleased": "2023-03-01T00:00:00.1234567Z",
        "allowModDistribution": true,
        "gamePopularityRank": 2,
        "isAvailable": true,
        "thumbsUpCount": 0
    })
}

fn sample_mod() -> Mod {
    serde_json::from_value(mod_json()).unwrap()
}

#[test]
fn test_decodes_mixed_date_precision() {
    let m = sample_mod();
    assert_eq!(m.date_created.to_rfc3339(), "2015-11-23T06:14:39.970+00:00");
    assert_eq!(m.date_modified.to_rfc3339(), "2023-03-01T00:00:00+00:00");
    assert_eq!(m.categories[0].date_modified.map(|d| d.timestamp()), Some(1_399_571_079));
}

#[test]
fn test_bad_date_is_a_decode_error() {
    let mut value = mod_json();
    value["dateCreated"] = json!("yesterday");
    assert!(serde_json::from_value::<Mod>(value).is_err());
}

#[test]
fn test_optional_fields_absent() {
    let value = json!({
        "id": 1, "gameId": 432, "name": "x", "slug": "x",
        "dateCreated": "2020-01-01T00:00:00Z",
        "dateModified": "2020-01-01T00:00:00Z",
        "dateReleased": "2020-01-01T00:00:00Z"
    });
    let m: Mod = serde_json::from_value(value).unwrap();
    assert!(m.latest_files.is_empty());
    assert!(m.logo.is_none());
    assert!(m.class().is_none());
    assert!(!m.is_modpack());
    assert!(m.latest_release_file().is_none());
}

#[test]
fn test_class_helpers() {
    let m = sample_mod();
    assert_eq!(m.class(), Some(ClassId::Mods));
    assert!(!m.is_modpack());
}

#[test]
fn test_latest_release_file_skips_betas() {
    let m = sample_mod();
    assert_eq!(m.latest_release_file().map(|f| f.id), Some(3));
}

#[test]
fn test_supported_game_versions_deduped_in_order() {
    assert_eq!(sample_mod().supported_game_versions(), vec!["1.20.1", "1.19.2"]);
}

#[test]
fn test_download_count_formatting() {
    assert_eq!(sample_mod().formatted_download_count(), "345.7M");
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(1_500), "1.5K");
    assert_eq!(format_count(2_000_000_000), "2.0B");
}

#[test]
fn test_file_helpers() {
    let m = sample_mod();
    let f = &m.latest_files[0];
    assert_eq!(f.sha1_hash(), Some("da39a3ee5e6b4b0d3255bfef95601890afd80709"));
    assert_eq!(f.md5_hash(), Some("d41d8cd98f00b204e9800998ecf8427e"));
    assert_eq!(f.formatted_file_size(), "1.50 KB");
    assert_eq!(f.release_type_name(), "Release");
    assert_eq!(m.latest_files[1].release_type_name(), "Beta");
    assert!(f.download_url.is_none());
}

#[test]
fn test_file_size_units() {
    let mut f = sample_mod().latest_files.remove(0);
    f.file_length = 500;
    assert_eq!(f.formatted_file_size(), "500 B");
    f.file_length = 5 * 1024 * 1024;
    assert_eq!(f.formatted_file_size(), "5.00 MB");
}

#[test]
fn test_missing_hash() {
    let mut f = sample_mod().latest_files.remove(0);
    f.hashes.retain(|h| h.algo != FileHash::MD5);
    assert!(f.md5_hash().is_none());
    assert!(f.sha1_hash().is_some());
}

#[test]
fn test_search_response_shape() {
    let response: ModsSearchResponse = serde_json::from_value(json!({
        "data": [mod_json()],
        "pagination": { "index": 0, "pageSize": 25, "resultCount": 1, "totalCount": 1 }
    }))
    .unwrap();
    assert_eq!(response.len(), 1);
    assert!(!response.is_empty());
    assert!(!response.pagination.has_next_page());
}
