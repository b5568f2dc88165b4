use url::Url;

/// Resolved URLs for the integrations REST surface under a configurable base.
#[derive(Debug, Clone)]
pub struct IntegrationsEndpoints {
    collection: Url,
}

impl IntegrationsEndpoints {
    /// `base` is the API root, e.g. `http://host/core/`. A missing trailing slash is added so
    /// the last segment is not replaced on join.
    pub fn new(base: &Url) -> Result<Self, url::ParseError> {
        let mut base = base.clone();
        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            collection: base.join("integrations/")?,
        })
    }

    pub fn collection(&self) -> &Url {
        &self.collection
    }

    pub fn list(&self, only_enabled: bool) -> Url {
        let mut url = self.collection.clone();
        if only_enabled {
            url.query_pairs_mut().append_pair("onlyEnabled", "true");
        }
        url
    }

    pub fn item(&self, id: i64) -> Url {
        self.item_path(id, "")
    }

    pub fn install(&self, id: i64) -> Url {
        self.item_path(id, "install/")
    }

    pub fn frontend(&self, id: i64) -> Url {
        self.item_path(id, "frontend/")
    }

    fn item_path(&self, id: i64, suffix: &str) -> Url {
        let mut url = self.collection.clone();
        url.set_path(&format!("{}{id}/{suffix}", self.collection.path()));
        url
    }
}
