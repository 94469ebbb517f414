use crate::{Comparator, SkipList};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl<T: Serialize, C> Serialize for SkipList<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T, C> Deserialize<'de> for SkipList<T, C>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let eles: Vec<T> = Deserialize::deserialize(deserializer)?;
        Ok(SkipList::from(eles))
    }
}
