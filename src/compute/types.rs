/// Page size used when the caller gives none.
pub const DEFAULT_LIMIT: u32 = 50;

/// A listable compute API collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Instances,
    Images,
    MachineTypes,
    Snapshots,
    Backups,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Instances,
        Collection::Images,
        Collection::MachineTypes,
        Collection::Snapshots,
        Collection::Backups,
    ];

    /// Path segment under `/v1`.
    pub fn path(self) -> &'static str {
        match self {
            Self::Instances => "instances",
            Self::Images => "images",
            Self::MachineTypes => "machine-types",
            Self::Snapshots => "snapshots",
            Self::Backups => "backups",
        }
    }

    pub fn default_sort(self) -> &'static str {
        match self {
            Self::Images => "platform:asc,end_life_at:desc",
            _ => "created_at:asc",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.path() == path)
    }
}

/// Pagination, ordering and expansion for list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: u32,
    pub offset: u32,
    pub sort: String,
    pub expand: Vec<String>,
}

impl ListQuery {
    pub fn for_collection(collection: Collection) -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort: collection.default_sort().to_string(),
            expand: Vec::new(),
        }
    }

    /// Query string pairs in the API's underscore-prefixed convention.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("_limit", self.limit.to_string()),
            ("_offset", self.offset.to_string()),
            ("_sort", self.sort.clone()),
        ];
        pairs.extend(self.expand.iter().map(|e| ("expand", e.clone())));
        pairs
    }
}

/// Power-state transitions accepted by `POST /instances/{id}/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceAction {
    Start,
    Stop,
    Reboot,
    Suspend,
}

impl InstanceAction {
    pub fn path(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Reboot => "reboot",
            Self::Suspend => "suspend",
        }
    }

    /// Status word reported when the API answers with no body.
    pub fn done(self) -> &'static str {
        match self {
            Self::Start => "started",
            Self::Stop => "stopped",
            Self::Reboot => "rebooted",
            Self::Suspend => "suspended",
        }
    }
}
