//! Blog models shared by the unit tests.

use sermodel_core::{FieldInfo, ModelMeta, RelationshipInfo};

pub static AUTHOR: ModelMeta = ModelMeta {
    name: "author",
    table_name: "authors",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::text("name").max_length(40),
        FieldInfo::text("bio").nullable(true),
        FieldInfo::json("settings").nullable(true),
        FieldInfo::relation("profile", RelationshipInfo::one_to_one_reverse(profile, "author")),
        FieldInfo::relation("posts", RelationshipInfo::one_to_many(post, "author")),
    ],
};

pub static PROFILE: ModelMeta = ModelMeta {
    name: "profile",
    table_name: "profiles",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::relation(
            "author",
            RelationshipInfo::one_to_one(author).back_populates("profile"),
        ),
        FieldInfo::text("website").nullable(true).pattern(r"^https?://"),
    ],
};

pub static POST: ModelMeta = ModelMeta {
    name: "post",
    table_name: "posts",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::text("title"),
        FieldInfo::relation(
            "author",
            RelationshipInfo::many_to_one(author).back_populates("posts"),
        ),
        FieldInfo::json("metadata").nullable(true),
        FieldInfo::relation("comments", RelationshipInfo::one_to_many(comment, "post")),
        FieldInfo::relation("tags", RelationshipInfo::many_to_many(tag)),
    ],
};

pub static COMMENT: ModelMeta = ModelMeta {
    name: "comment",
    table_name: "comments",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::text("body").choices(&["ok", "spam"]),
        FieldInfo::relation("post", RelationshipInfo::many_to_one(post)),
    ],
};

pub static TAG: ModelMeta = ModelMeta {
    name: "tag",
    table_name: "tags",
    primary_key: "id",
    fields: &[FieldInfo::auto("id"), FieldInfo::text("label")],
};

/// A library whose shelves model is declared inconsistently.
pub static LIBRARY: ModelMeta = ModelMeta {
    name: "library",
    table_name: "libraries",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::text("name"),
        FieldInfo::relation("shelves", RelationshipInfo::one_to_many(shelf, "library")),
    ],
};

pub static SHELF: ModelMeta = ModelMeta {
    name: "shelf",
    table_name: "shelves",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::text("label"),
        FieldInfo::relation("label", RelationshipInfo::many_to_one(library)),
        FieldInfo::relation("library", RelationshipInfo::many_to_one(library)),
    ],
};

pub static ACCOUNT: ModelMeta = ModelMeta {
    name: "account",
    table_name: "accounts",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::text("email"),
        FieldInfo::relation("projects", RelationshipInfo::one_to_many(project, "owner")),
    ],
};

pub static PROJECT: ModelMeta = ModelMeta {
    name: "project",
    table_name: "projects",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::text("title"),
        FieldInfo::relation(
            "owner",
            RelationshipInfo::many_to_one(account).back_populates("projects"),
        ),
        FieldInfo::relation("tasks", RelationshipInfo::one_to_many(task, "project")),
    ],
};

/// Tasks point at their project and, separately, at the assigned account.
pub static TASK: ModelMeta = ModelMeta {
    name: "task",
    table_name: "tasks",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::text("summary"),
        FieldInfo::relation(
            "project",
            RelationshipInfo::many_to_one(project).back_populates("tasks"),
        ),
        FieldInfo::relation("account", RelationshipInfo::many_to_one(account)).nullable(true),
    ],
};

fn author() -> &'static ModelMeta {
    &AUTHOR
}

fn profile() -> &'static ModelMeta {
    &PROFILE
}

fn post() -> &'static ModelMeta {
    &POST
}

fn comment() -> &'static ModelMeta {
    &COMMENT
}

fn tag() -> &'static ModelMeta {
    &TAG
}

fn library() -> &'static ModelMeta {
    &LIBRARY
}

fn shelf() -> &'static ModelMeta {
    &SHELF
}

fn account() -> &'static ModelMeta {
    &ACCOUNT
}

fn project() -> &'static ModelMeta {
    &PROJECT
}

fn task() -> &'static ModelMeta {
    &TASK
}
