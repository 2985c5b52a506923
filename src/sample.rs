// 🌱 Sample vocabulary for a first run (`code-vocab seed`)

use crate::entry::Entry;
use crate::persistence::Snapshot;
use crate::store::DEFAULT_CATEGORIES;

/// Category used by the sample data on top of the defaults
pub const BUILTIN_FUNCTIONS: &str = "内置函数";

// (content, category, explanation, example, pronunciation)
const SAMPLES: [(&str, &str, &str, &str, &str); 12] = [
    (
        "for 循环",
        "循环结构",
        "for循环是Python中最常用的循环结构，用于遍历可迭代对象（如列表、元组、字符串等）",
        "for i in range(5):\n    print(i)\n# 输出：0, 1, 2, 3, 4",
        "for 循环",
    ),
    (
        "while 循环",
        "循环结构",
        "while循环在条件为真时重复执行代码块，直到条件变为假",
        "count = 0\nwhile count < 5:\n    print(count)\n    count += 1",
        "while 循环",
    ),
    (
        "str 字符串",
        "数据类型",
        "字符串是Python中的文本数据类型，用单引号或双引号包围",
        "name = 'Python'\nmessage = \"Hello, World!\"\nprint(name + ' ' + message)",
        "string 字符串",
    ),
    (
        "list 列表",
        "数据类型",
        "列表是Python中最常用的数据类型，可以存储多个元素，支持增删改查操作",
        "fruits = ['apple', 'banana', 'orange']\nfruits.append('grape')\nprint(fruits[0])",
        "list 列表",
    ),
    (
        "dict 字典",
        "数据类型",
        "字典是键值对的数据结构，通过键来访问值，键必须是不可变类型",
        "person = {'name': 'Alice', 'age': 25}\nprint(person['name'])\nperson['city'] = 'Beijing'",
        "dictionary 字典",
    ),
    (
        "def 函数定义",
        "函数与类",
        "def关键字用于定义函数，函数是一段可重用的代码块",
        "def greet(name):\n    return f'Hello, {name}!'\n\nresult = greet('World')\nprint(result)",
        "define 函数定义",
    ),
    (
        "class 类定义",
        "函数与类",
        "class关键字用于定义类，类是面向对象编程的基础，可以创建对象",
        "class Person:\n    def __init__(self, name):\n        self.name = name\n\n    def greet(self):\n        return f'Hello, I am {self.name}'",
        "class 类定义",
    ),
    (
        "if 条件语句",
        "关键字",
        "if语句用于条件判断，根据条件是否为真执行不同的代码块",
        "age = 18\nif age >= 18:\n    print('成年人')\nelif age >= 12:\n    print('青少年')\nelse:\n    print('儿童')",
        "if 条件语句",
    ),
    (
        "try-except 异常处理",
        "异常处理",
        "try-except语句用于捕获和处理程序运行时的异常，提高程序的健壮性",
        "try:\n    number = int(input('请输入数字：'))\n    result = 10 / number\n    print(result)\nexcept ValueError:\n    print('输入的不是有效数字')\nexcept ZeroDivisionError:\n    print('不能除以零')",
        "try except 异常处理",
    ),
    (
        "import 模块导入",
        "模块导入",
        "import语句用于导入Python模块，使用模块中的函数、类或变量",
        "import math\nprint(math.pi)\nprint(math.sqrt(16))\n\nfrom datetime import datetime\nprint(datetime.now())",
        "import 模块导入",
    ),
    (
        "open() 文件操作",
        "文件操作",
        "open()函数用于打开文件，支持读取、写入、追加等操作模式",
        "# 读取文件\nwith open('file.txt', 'r', encoding='utf-8') as f:\n    content = f.read()\n\n# 写入文件\nwith open('output.txt', 'w', encoding='utf-8') as f:\n    f.write('Hello, World!')",
        "open 文件操作",
    ),
    (
        "range() 范围函数",
        BUILTIN_FUNCTIONS,
        "range()函数用于生成一个数字序列，常用于for循环中",
        "# 生成0到4的序列\nfor i in range(5):\n    print(i)\n\n# 生成2到10的序列，步长为2\nfor i in range(2, 11, 2):\n    print(i)",
        "range 范围函数",
    ),
];

pub fn sample_entries() -> Vec<Entry> {
    SAMPLES
        .iter()
        .map(|(content, category, explanation, example, pronunciation)| {
            Entry::new(*content, *category, *explanation, *example, *pronunciation)
        })
        .collect()
}

/// Sample entries plus the default categories and `内置函数`
pub fn sample_snapshot() -> Snapshot {
    let mut categories: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
    categories.push(BUILTIN_FUNCTIONS.to_string());

    Snapshot {
        vocab_data: sample_entries(),
        categories,
    }
}
