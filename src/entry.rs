use std::cmp::Ordering;

#[derive(Serialize, Deserialize, Debug)]
pub struct Entry<T, U>
where T: Ord
{
    pub score: T,
    pub key: U,
}

impl<T, U> Ord for Entry<T, U>
where T: Ord
{
    fn cmp(&self, other: &Entry<T, U>) -> Ordering {
        self.score.cmp(&other.score)
    }
}

impl<T, U> PartialOrd for Entry<T, U>
where T: Ord
{
    fn partial_cmp(&self, other: &Entry<T, U>) -> Option<Ordering> {
        Some(self.score.cmp(&other.score))
    }
}

impl<T, U> PartialEq for Entry<T, U>
where T: Ord
{
    fn eq(&self, other: &Entry<T, U>) -> bool {
        self.score == other.score
    }
}

impl<T, U> Eq for Entry<T, U> where T: Ord {}

#[cfg(test)]
mod tests {
    use super::Entry;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_ordering_ignores_key() {
        let one = Entry { score: 1, key: "one" };
        let uno = Entry { score: 1, key: "uno" };
        let two = Entry { score: 2, key: "two" };

        assert_eq!(one, uno);
        assert!(one < two);
        assert!(two > uno);
    }

    #[test]
    fn test_ser_de() {
        let entry = Entry {
            score: 1,
            key: String::from("one"),
        };

        assert_tokens(&entry, &[
            Token::Struct { name: "Entry", len: 2 },
            Token::Str("score"),
            Token::I32(1),
            Token::Str("key"),
            Token::Str("one"),
            Token::StructEnd,
        ]);
    }
}
