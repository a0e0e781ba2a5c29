use bson::oid::ObjectId;
use bson::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub tutor: String,
    #[serde(default)]
    pub desc: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

/// Fields to overwrite on an existing course; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub tag: Option<String>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub tutor: Option<String>,
    pub desc: Option<String>,
}

impl CourseChanges {
    fn fields(&self) -> [(&'static str, &Option<String>); 6] {
        [
            ("title", &self.title),
            ("tag", &self.tag),
            ("duration", &self.duration),
            ("price", &self.price),
            ("tutor", &self.tutor),
            ("desc", &self.desc),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_none())
    }

    /// The `$set` body for the supplied fields.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        for (key, value) in self.fields() {
            if let Some(v) = value {
                doc.insert(key, v.clone());
            }
        }
        doc
    }

    pub fn apply(&self, course: &mut Course) {
        let targets = [
            (&self.title, &mut course.title),
            (&self.tag, &mut course.tag),
            (&self.duration, &mut course.duration),
            (&self.price, &mut course.price),
            (&self.tutor, &mut course.tutor),
            (&self.desc, &mut course.desc),
        ];
        for (change, field) in targets {
            if let Some(v) = change {
                *field = v.clone();
            }
        }
    }
}
