//! In-memory object store backing the mock control plane.
//!
//! Objects are stored as raw JSON values so one engine can serve every
//! collection; the static [`COLLECTIONS`] table supplies the per-kind
//! differences (path, alert label, name field, whether ids are assigned).

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Static description of one API collection.
pub struct CollectionSpec {
    /// URL path segment under `/api/5.0/`.
    pub path: &'static str,
    /// Label used in alert texts ("cdn was created.").
    pub singular: &'static str,
    /// The unique, human-facing key field. Empty for pair-keyed
    /// association collections.
    pub name_field: &'static str,
    /// Whether the service assigns a numeric id on create.
    pub has_id: bool,
}

/// Every collection the generic engine serves. The delivery-service/server
/// assignment endpoint has its own handlers and is not listed here.
pub const COLLECTIONS: &[CollectionSpec] = &[
    CollectionSpec { path: "types", singular: "type", name_field: "name", has_id: true },
    CollectionSpec { path: "statuses", singular: "status", name_field: "name", has_id: true },
    CollectionSpec { path: "divisions", singular: "division", name_field: "name", has_id: true },
    CollectionSpec { path: "regions", singular: "region", name_field: "name", has_id: true },
    CollectionSpec { path: "phys_locations", singular: "physLocation", name_field: "name", has_id: true },
    CollectionSpec { path: "coordinates", singular: "coordinate", name_field: "name", has_id: true },
    CollectionSpec { path: "cdns", singular: "cdn", name_field: "name", has_id: true },
    CollectionSpec { path: "cachegroups", singular: "cachegroup", name_field: "name", has_id: true },
    CollectionSpec { path: "profiles", singular: "profile", name_field: "name", has_id: true },
    CollectionSpec { path: "parameters", singular: "parameter", name_field: "", has_id: true },
    CollectionSpec { path: "profileparameters", singular: "profile parameter", name_field: "", has_id: false },
    CollectionSpec { path: "tenants", singular: "tenant", name_field: "name", has_id: true },
    CollectionSpec { path: "users", singular: "user", name_field: "username", has_id: true },
    CollectionSpec { path: "server_capabilities", singular: "server capability", name_field: "name", has_id: false },
    CollectionSpec { path: "servers", singular: "server", name_field: "hostName", has_id: true },
    CollectionSpec { path: "server_server_capabilities", singular: "server capability assignment", name_field: "", has_id: false },
    CollectionSpec { path: "deliveryservices", singular: "deliveryservice", name_field: "xmlId", has_id: true },
    CollectionSpec { path: "asns", singular: "asn", name_field: "asn", has_id: true },
];

/// Look up a collection's spec by its URL path segment.
pub fn spec(path: &str) -> Option<&'static CollectionSpec> {
    COLLECTIONS.iter().find(|s| s.path == path)
}

/// How a referrer collection points at the collection being deleted.
pub enum RefBy {
    /// Referrer field holds the target's numeric id.
    Id(&'static str),
    /// Referrer field holds the target's name-field value.
    Name(&'static str),
    /// Referrer field is an array of name-field values.
    NameInArray(&'static str),
}

pub struct Referrer {
    pub collection: &'static str,
    pub by: RefBy,
}

/// Collections that must be empty of references before an object of the
/// given collection may be deleted. Reverse-order fixture teardown exists
/// exactly because of these.
pub fn referrers(path: &str) -> &'static [Referrer] {
    match path {
        "types" => &[
            Referrer { collection: "cachegroups", by: RefBy::Id("typeId") },
            Referrer { collection: "servers", by: RefBy::Id("typeId") },
            Referrer { collection: "deliveryservices", by: RefBy::Id("typeId") },
        ],
        "statuses" => &[Referrer { collection: "servers", by: RefBy::Id("statusId") }],
        "divisions" => &[Referrer { collection: "regions", by: RefBy::Id("division") }],
        "regions" => &[Referrer { collection: "phys_locations", by: RefBy::Id("regionId") }],
        "phys_locations" => &[Referrer { collection: "servers", by: RefBy::Id("physLocationId") }],
        "cdns" => &[
            Referrer { collection: "profiles", by: RefBy::Id("cdn") },
            Referrer { collection: "servers", by: RefBy::Id("cdnId") },
            Referrer { collection: "deliveryservices", by: RefBy::Id("cdnId") },
        ],
        "cachegroups" => &[
            Referrer { collection: "servers", by: RefBy::Id("cachegroupId") },
            Referrer { collection: "asns", by: RefBy::Id("cachegroupId") },
            Referrer { collection: "cachegroups", by: RefBy::Id("parentCachegroupId") },
            Referrer { collection: "cachegroups", by: RefBy::Id("secondaryParentCachegroupId") },
        ],
        "profiles" => &[
            Referrer { collection: "servers", by: RefBy::NameInArray("profileNames") },
            Referrer { collection: "profileparameters", by: RefBy::Id("profileId") },
        ],
        "parameters" => &[Referrer { collection: "profileparameters", by: RefBy::Id("parameterId") }],
        "tenants" => &[
            Referrer { collection: "users", by: RefBy::Id("tenantId") },
            Referrer { collection: "deliveryservices", by: RefBy::Id("tenantId") },
            Referrer { collection: "tenants", by: RefBy::Id("parentId") },
        ],
        "server_capabilities" => &[Referrer {
            collection: "server_server_capabilities",
            by: RefBy::Name("serverCapability"),
        }],
        "servers" => &[
            Referrer { collection: "server_server_capabilities", by: RefBy::Id("serverId") },
            Referrer { collection: "deliveryserviceserver", by: RefBy::Id("server") },
        ],
        "deliveryservices" => &[Referrer {
            collection: "deliveryserviceserver",
            by: RefBy::Id("deliveryService"),
        }],
        _ => &[],
    }
}

/// One collection's objects plus the bookkeeping the engine needs.
pub struct Collection {
    pub items: Vec<Value>,
    pub next_id: i64,
    pub last_modified: DateTime<Utc>,
}

impl Collection {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            last_modified: Utc::now(),
        }
    }
}

/// The whole in-memory data set.
pub struct Store {
    collections: HashMap<&'static str, Collection>,
    /// Username of the seeded admin account, protected from deletion.
    pub admin_username: String,
}

impl Store {
    /// A fresh store, seeded with the `root` tenant and the admin user.
    pub fn new(admin_username: &str) -> Self {
        let mut collections: HashMap<&'static str, Collection> = HashMap::new();
        for s in COLLECTIONS {
            collections.insert(s.path, Collection::new());
        }
        // Assignment rows live outside the generic table.
        collections.insert("deliveryserviceserver", Collection::new());

        let mut store = Self {
            collections,
            admin_username: admin_username.to_string(),
        };

        store.insert(
            "tenants",
            serde_json::json!({"name": "root", "active": true, "parentId": null}),
        );
        store.insert(
            "users",
            serde_json::json!({
                "username": admin_username,
                "fullName": "Administrator",
                "role": "admin",
                "tenant": "root",
                "tenantId": 1
            }),
        );
        store
    }

    pub fn collection(&self, path: &str) -> Option<&Collection> {
        self.collections.get(path)
    }

    pub fn collection_mut(&mut self, path: &str) -> Option<&mut Collection> {
        self.collections.get_mut(path)
    }

    /// Insert an object: assign an id when the collection uses them, stamp
    /// `lastUpdated`, bump the collection clock. Returns the stored copy.
    pub fn insert(&mut self, path: &str, mut obj: Value) -> Value {
        let has_id = spec(path).map(|s| s.has_id).unwrap_or(false);
        let now = Utc::now();
        if let Some(map) = obj.as_object_mut() {
            map.insert("lastUpdated".to_string(), Value::String(now.to_rfc3339()));
        }
        if let Some(coll) = self.collections.get_mut(path) {
            if has_id {
                if let Some(map) = obj.as_object_mut() {
                    map.insert("id".to_string(), Value::from(coll.next_id));
                }
                coll.next_id += 1;
            }
            coll.items.push(obj.clone());
            coll.last_modified = now;
        }
        obj
    }

    /// Bump a collection's modification clock (after updates/deletes).
    pub fn touch(&mut self, path: &str) {
        if let Some(coll) = self.collections.get_mut(path) {
            coll.last_modified = Utc::now();
        }
    }

    /// Find the id of the object whose name field equals `name`.
    pub fn lookup_id(&self, path: &str, name: &str) -> Option<i64> {
        let name_field = spec(path)?.name_field;
        self.collection(path)?
            .items
            .iter()
            .find(|item| item.get(name_field).and_then(Value::as_str) == Some(name))
            .and_then(|item| item.get("id"))
            .and_then(Value::as_i64)
    }

    /// Find a field of the object matching `match_field == match_value`.
    pub fn lookup_field(
        &self,
        path: &str,
        match_field: &str,
        match_value: &Value,
        want: &str,
    ) -> Option<Value> {
        self.collection(path)?
            .items
            .iter()
            .find(|item| item.get(match_field) == Some(match_value))
            .and_then(|item| item.get(want))
            .cloned()
    }

    /// Whether any object in any referrer collection still points at the
    /// object with the given id/name. Returns the referrer's path.
    pub fn find_referrer(
        &self,
        path: &str,
        id: Option<i64>,
        name: Option<&str>,
    ) -> Option<&'static str> {
        for referrer in referrers(path) {
            let Some(coll) = self.collection(referrer.collection) else {
                continue;
            };
            let hit = coll.items.iter().any(|item| match &referrer.by {
                RefBy::Id(field) => match id {
                    Some(id) => item.get(*field).and_then(Value::as_i64) == Some(id),
                    None => false,
                },
                RefBy::Name(field) => match name {
                    Some(name) => item.get(*field).and_then(Value::as_str) == Some(name),
                    None => false,
                },
                RefBy::NameInArray(field) => match name {
                    Some(name) => item
                        .get(*field)
                        .and_then(Value::as_array)
                        .map(|arr| arr.iter().any(|v| v.as_str() == Some(name)))
                        .unwrap_or(false),
                    None => false,
                },
            });
            if hit {
                return Some(referrer.collection);
            }
        }
        None
    }

    /// Resolve name references to ids (and backfill names from ids) before
    /// an object is stored, the way the service denormalizes on write.
    /// Errors name the missing reference.
    pub fn denormalize(&self, path: &str, obj: &mut Value) -> Result<(), String> {
        let Some(map) = obj.as_object_mut() else {
            return Err("request body must be an object".to_string());
        };
        match path {
            "regions" => {
                resolve_ref(self, map, "divisionName", "division", "divisions")?;
            }
            "phys_locations" => {
                resolve_ref(self, map, "region", "regionId", "regions")?;
            }
            "cachegroups" => {
                resolve_ref(self, map, "typeName", "typeId", "types")?;
                resolve_ref(self, map, "parentCachegroupName", "parentCachegroupId", "cachegroups")?;
                resolve_ref(
                    self,
                    map,
                    "secondaryParentCachegroupName",
                    "secondaryParentCachegroupId",
                    "cachegroups",
                )?;
            }
            "profiles" => {
                resolve_ref(self, map, "cdnName", "cdn", "cdns")?;
                // Nested fixture parameters are not part of the wire object.
                map.remove("params");
            }
            "servers" => {
                resolve_ref(self, map, "cachegroup", "cachegroupId", "cachegroups")?;
                resolve_ref(self, map, "cdnName", "cdnId", "cdns")?;
                resolve_ref(self, map, "physLocation", "physLocationId", "phys_locations")?;
                resolve_ref(self, map, "status", "statusId", "statuses")?;
                resolve_ref(self, map, "type", "typeId", "types")?;
            }
            "deliveryservices" => {
                resolve_ref(self, map, "cdnName", "cdnId", "cdns")?;
                resolve_ref(self, map, "tenant", "tenantId", "tenants")?;
                resolve_ref(self, map, "type", "typeId", "types")?;
            }
            "asns" => {
                resolve_ref(self, map, "cachegroup", "cachegroupId", "cachegroups")?;
            }
            "tenants" => {
                resolve_ref(self, map, "parentName", "parentId", "tenants")?;
            }
            "users" => {
                resolve_ref(self, map, "tenant", "tenantId", "tenants")?;
                // The password is write-only; it is never stored or echoed.
                map.remove("localPasswd");
            }
            "server_server_capabilities" => {
                resolve_ref(self, map, "server", "serverId", "servers")?;
                let capability = map
                    .get("serverCapability")
                    .and_then(Value::as_str)
                    .ok_or("serverCapability is required")?;
                if self
                    .lookup_field("server_capabilities", "name", &Value::from(capability), "name")
                    .is_none()
                {
                    return Err(format!("no server capability named '{capability}'"));
                }
            }
            "profileparameters" => {
                let profile_id = map
                    .get("profileId")
                    .and_then(Value::as_i64)
                    .ok_or("profileId is required")?;
                let parameter_id = map
                    .get("parameterId")
                    .and_then(Value::as_i64)
                    .ok_or("parameterId is required")?;
                let profile_name = self
                    .lookup_field("profiles", "id", &Value::from(profile_id), "name")
                    .ok_or(format!("no profile with id {profile_id}"))?;
                if self
                    .lookup_field("parameters", "id", &Value::from(parameter_id), "id")
                    .is_none()
                {
                    return Err(format!("no parameter with id {parameter_id}"));
                }
                map.insert("profile".to_string(), profile_name);
            }
            _ => {}
        }
        Ok(())
    }
}

/// If `id_key` is unset and `name_key` holds a name, resolve the name to
/// an id through the target collection; if `id_key` is set and `name_key`
/// unset, backfill the name. A name that matches nothing is an error.
fn resolve_ref(
    store: &Store,
    map: &mut Map<String, Value>,
    name_key: &str,
    id_key: &str,
    target: &str,
) -> Result<(), String> {
    let id_unset = map.get(id_key).map(Value::is_null).unwrap_or(true);
    let name = map.get(name_key).and_then(Value::as_str).map(str::to_string);

    if id_unset {
        if let Some(name) = name {
            let id = store
                .lookup_id(target, &name)
                .ok_or(format!("no {} named '{}'", singular_of(target), name))?;
            map.insert(id_key.to_string(), Value::from(id));
        }
        return Ok(());
    }

    if name.is_none() {
        if let Some(id) = map.get(id_key).and_then(Value::as_i64) {
            let name_field = spec(target).map(|s| s.name_field).unwrap_or("name");
            if let Some(n) = store.lookup_field(target, "id", &Value::from(id), name_field) {
                map.insert(name_key.to_string(), n);
            }
        }
    }
    Ok(())
}

fn singular_of(path: &str) -> &'static str {
    spec(path).map(|s| s.singular).unwrap_or("object")
}
